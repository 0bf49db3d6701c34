/// Name that gets the formal treatment in `greet_user_prompt`
pub const FORMAL_NAME: &str = "Laurent";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GreetingStyle {
    Formal,
    Street,
}

impl GreetingStyle {
    pub fn for_name(name: &str) -> Self {
        if name == FORMAL_NAME {
            Self::Formal
        } else {
            Self::Street
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Formal => "formal",
            Self::Street => "street",
        }
    }

    pub fn greet(self, name: &str) -> String {
        match self {
            Self::Formal => format!("Good day to you, {name}. I trust this message finds you well."),
            Self::Street => format!("Yo {name}! Wassup? You good?"),
        }
    }
}

/// Instruction text for the greeting prompt.
pub fn greeting_instructions(name: &str) -> String {
    format!(
        "Return a greeting message for a user called '{name}'.\n\
         If the user is called '{FORMAL_NAME}', use a formal style, else use a street style.\n\
         For this user, use a {} style.",
        GreetingStyle::for_name(name).label()
    )
}
