mod documents;
mod queries;

pub use documents::DocumentClient;
pub use queries::QueryClient;
