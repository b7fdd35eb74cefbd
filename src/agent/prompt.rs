// file: src/agent/prompt.rs
// description: prompt text sent to the model backend

use crate::models::ResponseSchema;

pub const REFLECTION_PROMPT: &str = "Review your previous answer against the task. \
Check that every issue and recommendation is supported by what the tools returned, \
remove anything speculative, and add anything important you missed. \
Reply with the corrected final answer only, as a single JSON object matching the schema.";

pub fn system_prompt(agent_name: &str, schema: &ResponseSchema) -> String {
    format!(
        "You are {agent_name}, an agent that completes tasks using the tools provided.\n\
         Call tools whenever you need data; do not invent repository contents or error logs.\n\
         When you are done, reply with a single JSON object (no prose) that validates against \
         this JSON Schema named {name}:\n{schema}",
        agent_name = agent_name,
        name = schema.name,
        schema = schema.pretty(),
    )
}
