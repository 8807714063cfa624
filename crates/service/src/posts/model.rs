use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A blog post as persisted in the JSON array.
///
/// `likes` and `comments` may be absent in older files and decode as `0` / `[]`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: Vec<String>,
}

/// Caller-supplied text fields for add and update; id and counters are server-owned.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PostInput {
    pub title: String,
    pub author: String,
    pub content: String,
}

impl Post {
    /// New post with a fresh random id, zero likes and no comments.
    pub fn new(input: PostInput) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            author: input.author,
            content: input.content,
            likes: 0,
            comments: Vec::new(),
        }
    }

    /// Overwrite the text fields, leaving id, likes and comments alone.
    pub fn apply(&mut self, input: PostInput) {
        self.title = input.title;
        self.author = input.author;
        self.content = input.content;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_counters_default() {
        let post: Post = serde_json::from_str(
            r#"{"id":"1","title":"t","author":"a","content":"c"}"#,
        )
        .unwrap();
        assert_eq!(post.likes, 0);
        assert!(post.comments.is_empty());
    }

    #[test]
    fn missing_id_is_rejected() {
        let res = serde_json::from_str::<Post>(r#"{"title":"t"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn apply_keeps_identity_and_counters() {
        let mut post = Post::new(PostInput { title: "a".into(), author: "b".into(), content: "c".into() });
        post.likes = 3;
        post.comments.push("hi".into());
        let id = post.id.clone();

        post.apply(PostInput { title: "x".into(), author: "y".into(), content: "z".into() });
        assert_eq!(post.id, id);
        assert_eq!(post.likes, 3);
        assert_eq!(post.comments, vec!["hi"]);
        assert_eq!((post.title.as_str(), post.author.as_str(), post.content.as_str()), ("x", "y", "z"));
    }

    #[test]
    fn new_ids_differ() {
        let a = Post::new(PostInput::default());
        let b = Post::new(PostInput::default());
        assert_ne!(a.id, b.id);
    }
}
