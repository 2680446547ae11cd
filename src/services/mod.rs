pub mod prompt_builder;
pub mod question_identifier;
pub mod response_parser;
pub mod validator;

pub use question_identifier::identify_question_type;
pub use response_parser::{extract_json_object, normalize};
pub use validator::validate;
