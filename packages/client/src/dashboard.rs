//! Dashboard: the post list, its status filter and counts, and deletion.

use api::models::{Post, PostStatus};

use crate::backend::PinspireBackend;
use crate::error::FlowError;

/// Status tab selected on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(PostStatus),
}

impl StatusFilter {
    pub const TABS: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Only(PostStatus::Draft),
        StatusFilter::Only(PostStatus::Scheduled),
        StatusFilter::Only(PostStatus::Published),
    ];

    pub fn matches(&self, post: &Post) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => post.status == *status,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostStats {
    pub total: usize,
    pub draft: usize,
    pub scheduled: usize,
    pub published: usize,
}

impl PostStats {
    pub fn of(posts: &[Post]) -> Self {
        posts.iter().fold(
            PostStats {
                total: posts.len(),
                ..PostStats::default()
            },
            |mut stats, post| {
                match post.status {
                    PostStatus::Draft => stats.draft += 1,
                    PostStatus::Scheduled => stats.scheduled += 1,
                    PostStatus::Published => stats.published += 1,
                }
                stats
            },
        )
    }

    /// Count shown on a filter tab.
    pub fn count(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.total,
            StatusFilter::Only(PostStatus::Draft) => self.draft,
            StatusFilter::Only(PostStatus::Scheduled) => self.scheduled,
            StatusFilter::Only(PostStatus::Published) => self.published,
        }
    }
}

pub fn filter_posts(posts: &[Post], filter: StatusFilter) -> Vec<Post> {
    posts.iter().filter(|p| filter.matches(p)).cloned().collect()
}

pub struct Dashboard<'a, B> {
    backend: &'a B,
}

impl<'a, B: PinspireBackend> Dashboard<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    pub async fn list(&self) -> Result<Vec<Post>, FlowError> {
        self.backend
            .list_posts()
            .await
            .map_err(|e| FlowError::remote(e, "Failed to fetch posts"))
    }

    /// Delete `post_id` once `confirm` agrees, then drop it from `posts`.
    /// On failure `posts` is left untouched.
    pub async fn delete(
        &self,
        posts: &mut Vec<Post>,
        post_id: &str,
        confirm: impl FnOnce() -> bool,
    ) -> Result<(), FlowError> {
        if !confirm() {
            return Err(FlowError::Cancelled);
        }

        if let Err(e) = self.backend.delete_post(post_id.to_string()).await {
            tracing::warn!("Failed to delete post {}: {}", post_id, e);
            return Err(FlowError::Remote("Failed to delete post".to_string()));
        }

        posts.retain(|p| p.id != post_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{post, FakeBackend};

    fn five_posts() -> Vec<Post> {
        vec![
            post("p1", PostStatus::Draft),
            post("p2", PostStatus::Draft),
            post("p3", PostStatus::Scheduled),
            post("p4", PostStatus::Published),
            post("p5", PostStatus::Published),
        ]
    }

    #[tokio::test]
    async fn test_filter_and_stats() {
        let backend = FakeBackend::with_posts(five_posts());
        let posts = Dashboard::new(&backend).list().await.unwrap();

        let published = filter_posts(&posts, StatusFilter::Only(PostStatus::Published));
        let ids: Vec<&str> = published.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p4", "p5"]);

        assert_eq!(
            PostStats::of(&posts),
            PostStats {
                total: 5,
                draft: 2,
                scheduled: 1,
                published: 2
            }
        );
        assert_eq!(filter_posts(&posts, StatusFilter::All).len(), 5);
        assert_eq!(backend.calls_to("list_posts"), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let backend = FakeBackend::with_posts(five_posts());
        let dashboard = Dashboard::new(&backend);
        let mut posts = dashboard.list().await.unwrap();

        dashboard.delete(&mut posts, "p3", || true).await.unwrap();

        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p4", "p5"]);
        assert_eq!(backend.args_of("delete_post"), vec!["p3"]);
    }

    #[tokio::test]
    async fn test_delete_declined_or_failed_keeps_list() {
        let backend = FakeBackend::with_posts(five_posts());
        let dashboard = Dashboard::new(&backend);
        let mut posts = five_posts();

        let err = dashboard.delete(&mut posts, "p1", || false).await.unwrap_err();
        assert_eq!(err, FlowError::Cancelled);
        assert_eq!(backend.calls_to("delete_post"), 0);

        backend.fail("delete_post", "Post not found");
        let err = dashboard.delete(&mut posts, "p1", || true).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete post");
        assert_eq!(posts.len(), 5);
    }

    #[test]
    fn test_tab_labels() {
        let labels: Vec<&str> = StatusFilter::TABS.iter().map(|f| f.label()).collect();
        assert_eq!(labels, vec!["all", "draft", "scheduled", "published"]);
    }
}
