pub mod request_id;

pub use request_id::{extract_request_id, request_id_layer, X_REQUEST_ID};
