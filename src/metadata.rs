#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Post {
    pub title: String,
    pub date: chrono::NaiveDate,
    pub description: String,
    pub filename: String,
    pub link: String,
}
