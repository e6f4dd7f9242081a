pub mod errors;
pub mod db;
pub mod account;
pub mod counselor;
pub mod counseling_field;
pub mod bookmark;
pub mod reservation;
pub mod consult_detail;
pub mod review;
pub mod review_tag;
pub mod review_tag_map;

#[cfg(test)]
mod tests;
