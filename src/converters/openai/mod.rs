pub mod openai_choice;
pub mod openai_response;
pub mod openai_response_message;

pub use openai_choice::OpenAIChoice;
pub use openai_response::OpenAIResponse;
pub use openai_response_message::OpenAIResponseMessage;
