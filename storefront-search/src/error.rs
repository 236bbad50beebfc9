use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
	#[error("Invalid query: search text is empty after normalization")]
	InvalidQuery,
	#[error("Invalid pagination: {0}")]
	InvalidPagination(String),
	#[error("Invalid filter: {0}")]
	InvalidFilter(String),
	#[error("Repository error: {0}")]
	Repository(String),
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	#[error("Serialization error: {0}")]
	Serialization(String),
}

impl SearchError {
	pub fn code(&self) -> &str {
		match self {
			Self::InvalidQuery => "SEARCH_INVALID_QUERY",
			Self::InvalidPagination(_) => "SEARCH_INVALID_PAGINATION",
			Self::InvalidFilter(_) => "SEARCH_INVALID_FILTER",
			Self::Repository(_) => "SEARCH_REPOSITORY",
			Self::Io(_) => "SEARCH_IO",
			Self::Serialization(_) => "SEARCH_SERIALIZATION",
		}
	}

	pub fn to_json_rpc_error(&self) -> serde_json::Value {
		serde_json::json!({
			"searchCode": self.code(),
			"message": self.to_string(),
		})
	}
}
