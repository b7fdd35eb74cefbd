// file: src/agent/runtime.rs
// description: agent loop that drives a model backend and one MCP tool server
// reference: https://platform.openai.com/docs/guides/function-calling

use crate::agent::executor::TaskExecutor;
use crate::agent::prompt;
use crate::agent::tooling::{ToolConnector, ToolSession};
use crate::config::{AgentConfig, Config};
use crate::error::{AgentError, Result};
use crate::llm::{ChatClient, ChatMessage, ToolCall, ToolSpec};
use crate::mcp::McpConnector;
use crate::models::{ResponseSchema, TaskRequest};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The agent: a name, a model, and a way to reach tools.
///
/// Immutable once built; one instance serves every request.
pub struct McpAgent {
    name: String,
    model: ChatClient,
    connector: Arc<dyn ToolConnector>,
    reflection: bool,
    max_tool_rounds: usize,
}

impl McpAgent {
    pub fn new(config: &AgentConfig, model: ChatClient, connector: Arc<dyn ToolConnector>) -> Self {
        Self {
            name: config.name.clone(),
            model,
            connector,
            reflection: config.reflection,
            max_tool_rounds: config.max_tool_rounds,
        }
    }

    /// Builds the production agent: configured model, tools over child-process MCP.
    pub fn from_config(config: &Config) -> Result<Self> {
        let model = ChatClient::new(&config.model)?;
        info!(
            "Agent '{}' using model {} (reflection: {})",
            config.agent.name,
            model.model(),
            config.agent.reflection
        );
        Ok(Self::new(&config.agent, model, Arc::new(McpConnector)))
    }

    async fn run(&self, task: &TaskRequest, session: &dyn ToolSession) -> Result<String> {
        let tools: Vec<ToolSpec> = session
            .list_tools()
            .await?
            .into_iter()
            .map(|tool| ToolSpec::function(tool.name, tool.description, tool.input_schema))
            .collect();

        let mut messages = vec![
            ChatMessage::system(prompt::system_prompt(&self.name, &task.schema)),
            ChatMessage::user(task.instruction.clone()),
        ];

        for round in 0..=self.max_tool_rounds {
            let reply = self.model.complete(&messages, &tools).await?;

            if reply.tool_calls().is_empty() {
                let draft = reply.text_content().to_string();
                messages.push(reply);
                debug!("Task {} produced a draft after {} tool round(s)", task.id, round);

                if self.reflection {
                    return self.reflect(&mut messages, &tools, &task.schema, draft).await;
                }
                return Ok(draft);
            }

            if round == self.max_tool_rounds {
                break;
            }

            let calls = reply.tool_calls().to_vec();
            messages.push(reply);

            for call in calls {
                let output = self.invoke(session, &call).await?;
                messages.push(ChatMessage::tool_result(call.id, output));
            }
        }

        Err(AgentError::ToolRoundsExhausted(self.max_tool_rounds))
    }

    async fn invoke(&self, session: &dyn ToolSession, call: &ToolCall) -> Result<String> {
        let arguments = match parse_arguments(&call.function.arguments) {
            Ok(arguments) => arguments,
            Err(e) => {
                warn!("Model sent malformed arguments for {}: {}", call.function.name, e);
                return Ok(format!("error: arguments must be a JSON object ({})", e));
            }
        };

        session.call_tool(&call.function.name, arguments).await
    }

    /// One self-review pass over the draft. The revision is kept only when it
    /// fits the task's response shape; otherwise the draft stands.
    async fn reflect(
        &self,
        messages: &mut Vec<ChatMessage>,
        tools: &[ToolSpec],
        schema: &ResponseSchema,
        draft: String,
    ) -> Result<String> {
        messages.push(ChatMessage::user(prompt::REFLECTION_PROMPT));
        let revised = self.model.complete(messages.as_slice(), tools).await?;

        if revised.tool_calls().is_empty() && schema.accepts(revised.text_content()) {
            Ok(revised.text_content().to_string())
        } else {
            debug!("Reflection produced no usable revision, keeping draft");
            Ok(draft)
        }
    }
}

#[async_trait]
impl TaskExecutor for McpAgent {
    async fn execute(&self, task: TaskRequest) -> Result<String> {
        let session = self.connector.connect(&task.tool).await?;
        let outcome = self.run(&task, session.as_ref()).await;
        session.close().await?;
        outcome
    }
}

fn parse_arguments(raw: &str) -> std::result::Result<Map<String, Value>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Map::new());
    }
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentAdapter;
    use crate::agent::tooling::ToolInfo;
    use crate::mcp::ToolDescriptor;
    use crate::models::{CodeReviewResponse, SentryIssuesResponse};
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use wiremock::matchers::{body_string_contains, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Default)]
    struct FakeTools {
        calls: Arc<Mutex<Vec<(String, Map<String, Value>)>>>,
        closed: Arc<AtomicBool>,
    }

    struct FakeSession {
        calls: Arc<Mutex<Vec<(String, Map<String, Value>)>>>,
        closed: Arc<AtomicBool>,
    }

    #[async_trait]
    impl ToolConnector for FakeTools {
        async fn connect(&self, _descriptor: &ToolDescriptor) -> Result<Box<dyn ToolSession>> {
            Ok(Box::new(FakeSession {
                calls: Arc::clone(&self.calls),
                closed: Arc::clone(&self.closed),
            }))
        }
    }

    #[async_trait]
    impl ToolSession for FakeSession {
        async fn list_tools(&self) -> Result<Vec<ToolInfo>> {
            Ok(vec![ToolInfo {
                name: "list_issues".to_string(),
                description: "List open issues".to_string(),
                input_schema: json!({"type": "object", "properties": {"repo": {"type": "string"}}}),
            }])
        }

        async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> Result<String> {
            self.calls.lock().unwrap().push((name.to_string(), arguments));
            Ok("issue #1: unused import".to_string())
        }

        async fn close(self: Box<Self>) -> Result<()> {
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    fn completion(message: Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({"choices": [{"message": message}]}))
    }

    fn agent(server: &MockServer, tools: &FakeTools, reflection: bool, rounds: usize) -> McpAgent {
        let mut config = Config::default_config();
        config.model.base_url = server.uri();
        config.model.api_key = Some("sk-test".to_string());
        config.agent.reflection = reflection;
        config.agent.max_tool_rounds = rounds;

        let connector = Arc::new(FakeTools {
            calls: Arc::clone(&tools.calls),
            closed: Arc::clone(&tools.closed),
        });
        McpAgent::new(&config.agent, ChatClient::new(&config.model).unwrap(), connector)
    }

    fn review_task() -> TaskRequest {
        TaskRequest::new::<CodeReviewResponse>(
            "Analyze the repository acme/widgets",
            ToolDescriptor::new("github", "npx"),
        )
    }

    #[tokio::test]
    async fn test_tool_call_round_then_final_answer() {
        let server = MockServer::start().await;
        let answer = r#"{"repository":"acme/widgets","issues":["unused import"],"recommendations":["remove it"]}"#;

        // Second round: the tool output is in the transcript.
        Mock::given(method("POST"))
            .and(body_string_contains("issue #1: unused import"))
            .respond_with(completion(json!({"role": "assistant", "content": answer})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(completion(json!({
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": "list_issues", "arguments": "{\"repo\":\"acme/widgets\"}"}
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tools = FakeTools::default();
        let agent = agent(&server, &tools, false, 3);
        let raw = agent.execute(review_task()).await.unwrap();

        assert_eq!(raw, answer);
        let calls = tools.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "list_issues");
        assert_eq!(calls[0].1["repo"], "acme/widgets");
        assert!(tools.closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_reflection_replaces_draft_with_revision() {
        let server = MockServer::start().await;
        let revised = r#"{"sentry_issues":["timeout"],"recommended_fixes":["raise pool"]}"#;

        Mock::given(method("POST"))
            .and(body_string_contains("Review your previous answer"))
            .respond_with(completion(json!({"role": "assistant", "content": revised})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(completion(json!({
                "role": "assistant",
                "content": r#"{"sentry_issues":[],"recommended_fixes":[]}"#
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tools = FakeTools::default();
        let agent = agent(&server, &tools, true, 3);
        let task = TaskRequest::new::<SentryIssuesResponse>(
            "Retrieve and analyze recent Sentry error logs",
            ToolDescriptor::new("sentry", "python"),
        );

        assert_eq!(agent.execute(task).await.unwrap(), revised);
    }

    #[tokio::test]
    async fn test_reflection_without_json_keeps_draft() {
        let server = MockServer::start().await;
        let draft = r#"{"repository":"acme/widgets","issues":[],"recommendations":[]}"#;

        Mock::given(method("POST"))
            .and(body_string_contains("Review your previous answer"))
            .respond_with(completion(json!({"role": "assistant", "content": "Looks good to me."})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(completion(json!({"role": "assistant", "content": draft})))
            .mount(&server)
            .await;

        let tools = FakeTools::default();
        let agent = agent(&server, &tools, true, 3);

        assert_eq!(agent.execute(review_task()).await.unwrap(), draft);
    }

    #[tokio::test]
    async fn test_reflection_with_foreign_json_keeps_draft() {
        let server = MockServer::start().await;
        let draft = r#"{"repository":"acme/widgets","issues":["unused import"],"recommendations":["remove dead code"]}"#;

        Mock::given(method("POST"))
            .and(body_string_contains("Review your previous answer"))
            .respond_with(completion(json!({
                "role": "assistant",
                "content": r#"{"verdict":"draft is correct"}"#
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(completion(json!({"role": "assistant", "content": draft})))
            .expect(1)
            .mount(&server)
            .await;

        let tools = FakeTools::default();
        let agent = Arc::new(agent(&server, &tools, true, 3));
        let adapter = AgentAdapter::new(agent);
        let review = adapter
            .execute::<CodeReviewResponse>(
                "Analyze the repository acme/widgets",
                &ToolDescriptor::new("github", "npx"),
            )
            .await
            .unwrap();

        assert_eq!(review.repository, "acme/widgets");
        assert_eq!(review.recommendations, vec!["remove dead code"]);
    }

    #[tokio::test]
    async fn test_endless_tool_calls_exhaust_rounds_and_close_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(completion(json!({
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_n",
                    "type": "function",
                    "function": {"name": "list_issues", "arguments": ""}
                }]
            })))
            .expect(3)
            .mount(&server)
            .await;

        let tools = FakeTools::default();
        let agent = agent(&server, &tools, false, 2);
        let err = agent.execute(review_task()).await.unwrap_err();

        assert!(matches!(err, AgentError::ToolRoundsExhausted(2)));
        assert_eq!(tools.calls.lock().unwrap().len(), 2);
        assert!(tools.closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_model_failure_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let tools = FakeTools::default();
        let agent = agent(&server, &tools, true, 3);

        assert!(matches!(
            agent.execute(review_task()).await,
            Err(AgentError::Model(_))
        ));
        assert!(tools.closed.load(Ordering::SeqCst));
    }

    #[test]
    fn test_parse_arguments() {
        assert!(parse_arguments("").unwrap().is_empty());
        assert_eq!(parse_arguments(r#"{"a":1}"#).unwrap()["a"], 1);
        assert!(parse_arguments("[1,2]").is_err());
    }
}
