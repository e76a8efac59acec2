pub mod credentials;
pub mod descriptor;
pub mod error;
pub mod executor;
pub mod host;
pub mod loader;
pub mod request;

// Re-export the pieces hosts touch directly
pub use credentials::{credential_definition, Credentials};
pub use descriptor::node_descriptor;
pub use error::ConnectorError;
pub use executor::FractalForgeNode;
pub use host::{
    ExecutionContext, ExecutionItem, HttpError, HttpHelper, HttpRequest, InputItem, ReqwestHelper,
};
pub use loader::{load_entity_options, EntityOption};
pub use request::{build_request, RequestDescriptor};
