mod comments;
mod documentation;
mod incidents;
mod reception;

pub use comments::CommentsThread;
pub use documentation::DocumentationStep;
pub use incidents::IncidentsStep;
pub use reception::ReceptionStep;
