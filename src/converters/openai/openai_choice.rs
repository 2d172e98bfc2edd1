use crate::converters::openai::openai_response_message::OpenAIResponseMessage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpenAIChoice {
    pub message: OpenAIResponseMessage,
}
