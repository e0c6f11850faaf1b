mod validator;

pub use validator::{parse_category_id, validate_category_id, InputValidator};
