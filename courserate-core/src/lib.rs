pub mod openai;
pub mod producer;
pub mod review;
pub mod store;
pub mod summarizer;
pub mod transcript;
pub mod workflow;

pub use openai::*;
pub use producer::*;
pub use review::*;
pub use store::*;
pub use summarizer::*;
pub use transcript::*;
pub use workflow::*;
