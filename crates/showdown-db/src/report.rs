//! The users-with-long-names report.

use std::fmt;

use crate::context::AppDb;
use crate::entity::user;
use crate::error::QueryError;
use crate::filter::UserFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub name: String,
    pub content: Option<String>,
}

impl fmt::Display for ReportRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ Name = {}, Content = {} }}",
            self.name,
            self.content.as_deref().unwrap_or("")
        )
    }
}

/// Users with at least one post and a long name.
pub fn report_filter() -> UserFilter {
    UserFilter::HasPosts.and(user::has_long_name())
}

/// Every user matching [`report_filter`] paired with the content of its
/// first post by `Id`.
pub async fn users_with_first_post(db: &AppDb) -> Result<Vec<ReportRow>, QueryError> {
    let users = db.find_users(&report_filter()).await?;
    Ok(users
        .into_iter()
        .map(|(user, posts)| ReportRow {
            name: user.name,
            content: posts.into_iter().next().and_then(|post| post.content),
        })
        .collect())
}

pub fn render(rows: &[ReportRow]) -> String {
    rows.iter()
        .map(ReportRow::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
