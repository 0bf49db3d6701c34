use std::sync::Arc;

use rmcp::{
    handler::server::{
        router::{prompt::PromptRouter, tool::ToolRouter},
        wrapper::Parameters,
        ServerHandler,
    },
    model::{
        AnnotateAble, CallToolResult, Content, GetPromptRequestParam, GetPromptResult,
        Implementation, ListPromptsResult, ListResourceTemplatesResult, ListResourcesResult,
        PaginatedRequestParam, PromptMessage,
        PromptMessageRole, ProtocolVersion, RawResource, RawResourceTemplate,
        ReadResourceRequestParam, ReadResourceResult, ResourceContents, ServerCapabilities,
        ServerInfo,
    },
    prompt, prompt_handler, prompt_router,
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer,
};

use crate::constants::{
    FORECAST_UNAVAILABLE, GLOSSARY_TERM_URI_PREFIX, GLOSSARY_TERM_URI_TEMPLATE, GLOSSARY_URI,
    POINTS_UNAVAILABLE,
};
use crate::formatters::{format_alerts, format_forecast, forecast_url};
use crate::gateway::NwsClient;
use crate::glossary::GlossaryStore;
use crate::greeting::{greeting_instructions, GreetingStyle};
use crate::models::{
    AddNumbersRequest, GetAlertsRequest, GetForecastRequest, GreetPromptArgs, GreetRequest,
};

/// Weather MCP server: the tools, the glossary resources and the greeting
/// prompt, built once at startup and cloned per transport session.
#[derive(Clone)]
pub struct WeatherServer {
    nws: NwsClient,
    glossary: Arc<GlossaryStore>,
    tool_router: ToolRouter<Self>,
    prompt_router: PromptRouter<Self>,
}

impl WeatherServer {
    pub fn new(nws: NwsClient, glossary: GlossaryStore) -> Self {
        Self {
            nws,
            glossary: Arc::new(glossary),
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }

    /// Active alerts for a state, rendered as text
    pub async fn alerts_text(&self, state: &str) -> String {
        let data = self.nws.fetch(&self.nws.alerts_url(state)).await;
        format_alerts(data.as_ref())
    }

    /// Two-stage forecast lookup: points metadata, then the forecast it links to
    pub async fn forecast_text(&self, latitude: f64, longitude: f64) -> String {
        let Some(points) = self.nws.fetch(&self.nws.points_url(latitude, longitude)).await else {
            return POINTS_UNAVAILABLE.to_string();
        };

        let Some(url) = forecast_url(&points) else {
            tracing::warn!(latitude, longitude, "points payload has no forecast URL");
            return FORECAST_UNAVAILABLE.to_string();
        };

        let Some(forecast) = self.nws.fetch(&url).await else {
            return FORECAST_UNAVAILABLE.to_string();
        };

        format_forecast(&forecast).unwrap_or_else(|| {
            tracing::warn!(%url, "forecast payload has no periods");
            FORECAST_UNAVAILABLE.to_string()
        })
    }

    /// Resolves a glossary resource URI to its text content
    pub async fn read_glossary(&self, uri: &str) -> Result<String, McpError> {
        let result = if uri == GLOSSARY_URI {
            self.glossary.glossary_json().await
        } else if let Some(word) = uri.strip_prefix(GLOSSARY_TERM_URI_PREFIX) {
            self.glossary.lookup(word).await
        } else {
            return Err(McpError::resource_not_found(
                format!("Resource not found: {}", uri),
                None,
            ));
        };

        result.map_err(|e| {
            tracing::error!(error = %e, "glossary unavailable");
            McpError::internal_error(e.to_string(), None)
        })
    }
}

pub fn add_numbers(a: i64, b: i64) -> Option<i64> {
    a.checked_add(b)
}

fn glossary_resource() -> rmcp::model::Resource {
    let mut raw = RawResource::new(GLOSSARY_URI, "weather_glossary");
    raw.title = Some("Weather API Glossary".to_string());
    raw.description = Some(
        "A glossary from the weather API to better understand the terms used in the report"
            .to_string(),
    );
    raw.mime_type = Some("application/json".to_string());
    raw.no_annotation()
}

fn glossary_term_template() -> rmcp::model::ResourceTemplate {
    RawResourceTemplate {
        uri_template: GLOSSARY_TERM_URI_TEMPLATE.to_string(),
        name: "weather_glossary_term".to_string(),
        title: Some("Weather API Glossary".to_string()),
        description: Some(
            "Get a particular word's definition from the weather API glossary".to_string(),
        ),
        mime_type: Some("text/plain".to_string()),
    }
    .no_annotation()
}

#[tool_handler]
#[prompt_handler]
impl ServerHandler for WeatherServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "weather".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "A weather information service powered by the National Weather Service API. \
                Provides alerts and forecasts for US locations and a glossary of weather terms."
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult::with_all_items(vec![glossary_resource()]))
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        Ok(ListResourceTemplatesResult::with_all_items(vec![
            glossary_term_template(),
        ]))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        tracing::info!("Reading resource: {}", request.uri);

        let text = self.read_glossary(&request.uri).await?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, request.uri)],
        })
    }
}

#[tool_router]
impl WeatherServer {
    #[tool(description = "Get weather alerts for a US state. Provide a two-letter state code (e.g. CA, NY).")]
    async fn get_alerts(
        &self,
        Parameters(request): Parameters<GetAlertsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting alerts for state: {}", request.state);

        let text = self.alerts_text(&request.state).await;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Get weather forecast for a location. Provide latitude and longitude of the location.")]
    async fn get_forecast(
        &self,
        Parameters(request): Parameters<GetForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting forecast for coordinates: {}, {}",
            request.latitude,
            request.longitude
        );

        let text = self
            .forecast_text(request.latitude, request.longitude)
            .await;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Adds two numbers together")]
    async fn add_2_numbers(
        &self,
        Parameters(AddNumbersRequest { a, b }): Parameters<AddNumbersRequest>,
    ) -> Result<CallToolResult, McpError> {
        let sum = add_numbers(a, b).ok_or_else(|| {
            McpError::invalid_params(format!("{} + {} overflows a 64-bit integer", a, b), None)
        })?;

        Ok(CallToolResult::success(vec![Content::text(sum.to_string())]))
    }

    #[tool(description = "Returns a greeting message in a very formal tone for the given name.")]
    async fn greet_user_formal_tool(
        &self,
        Parameters(request): Parameters<GreetRequest>,
    ) -> Result<CallToolResult, McpError> {
        let text = GreetingStyle::Formal.greet(&request.name);
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Returns a greeting message in street style for the given name.")]
    async fn greet_user_street_style_tool(
        &self,
        Parameters(request): Parameters<GreetRequest>,
    ) -> Result<CallToolResult, McpError> {
        let text = GreetingStyle::Street.greet(&request.name);
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[prompt_router]
impl WeatherServer {
    #[prompt(name = "greet_user_prompt", description = "Generates a message asking for a greeting")]
    async fn greet_user_prompt(
        &self,
        Parameters(args): Parameters<GreetPromptArgs>,
    ) -> Result<GetPromptResult, McpError> {
        Ok(GetPromptResult {
            description: Some(format!("Greeting request for {}", args.name)),
            messages: vec![PromptMessage::new_text(
                PromptMessageRole::User,
                greeting_instructions(&args.name),
            )],
        })
    }
}
