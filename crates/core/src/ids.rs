//! Identifier generation.
//!
//! Ids are a type prefix plus 12 lowercase hex characters taken from a v4
//! UUID (48 random bits). Callers do not re-roll on collision: a duplicate
//! surfaces as a primary-key violation on insert.

use uuid::Uuid;

pub const PROJECT_ID_PREFIX: &str = "proj_";
pub const TEMPLATE_ID_PREFIX: &str = "tmpl_";

const SUFFIX_LEN: usize = 12;

fn random_suffix() -> String {
    let mut suffix = Uuid::new_v4().simple().to_string();
    suffix.truncate(SUFFIX_LEN);
    suffix
}

pub fn new_project_id() -> String {
    format!("{PROJECT_ID_PREFIX}{}", random_suffix())
}

pub fn new_template_id() -> String {
    format!("{TEMPLATE_ID_PREFIX}{}", random_suffix())
}
