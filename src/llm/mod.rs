pub mod credentials;
pub mod http_client;
pub mod huggingchat;
pub mod traits;
pub mod types;

pub use credentials::BackendCredentials;
pub use http_client::{build_http_client, build_http_client_with_timeout};
pub use huggingchat::HuggingChatBackend;
pub use traits::ChatBackend;
pub use types::ConversationHandle;
