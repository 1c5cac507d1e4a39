use crate::model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("input is empty")]
    EmptyInput,
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ChatError {
    pub fn user_message(&self) -> String {
        match self {
            ChatError::EmptyInput => "Please type a question first.".to_string(),
            ChatError::Model(error) => error.user_message(),
        }
    }
}
