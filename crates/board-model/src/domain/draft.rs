use crate::{Category, CreatePostRequest, Post, UpdatePostRequest, ValidationError};

/// Words that may not appear in a title, body or tag.
pub const FORBIDDEN_WORDS: [&str; 4] = ["캄보디아", "프놈펜", "불법체류", "텔레그램"];
/// Maximum tag length in characters.
pub const MAX_TAG_LEN: usize = 24;
/// Maximum number of tags per post.
pub const MAX_TAGS: usize = 5;

/// A post being written or edited, validated before it is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
    pub category: Category,
    tags: Vec<String>,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>, category: Category) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            category,
            tags: Vec::new(),
        }
    }

    /// Prefill a draft from an existing post (edit mode).
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            body: post.body.clone(),
            category: post.category,
            tags: post.tags.clone(),
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Add a tag after trimming it.
    ///
    /// Checks run in order: empty, forbidden word, length, count, duplicate.
    pub fn add_tag(&mut self, raw: &str) -> Result<(), ValidationError> {
        let tag = raw.trim();
        if tag.is_empty() {
            return Err(ValidationError::EmptyTag);
        }
        if let Some(word) = forbidden_word(tag) {
            return Err(ValidationError::ForbiddenWord {
                field: "tag",
                word: word.to_string(),
            });
        }
        if tag.chars().count() > MAX_TAG_LEN {
            return Err(ValidationError::TagTooLong { max: MAX_TAG_LEN });
        }
        if self.tags.len() >= MAX_TAGS {
            return Err(ValidationError::TooManyTags { max: MAX_TAGS });
        }
        if self.tags.iter().any(|t| t == tag) {
            return Err(ValidationError::DuplicateTag(tag.to_string()));
        }
        self.tags.push(tag.to_string());
        Ok(())
    }

    /// Returns `true` if the tag was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        before != self.tags.len()
    }

    /// Check the submit-time rules: required fields first, then forbidden words.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::TitleRequired);
        }
        if self.body.trim().is_empty() {
            return Err(ValidationError::BodyRequired);
        }
        for (field, text) in [("title", &self.title), ("body", &self.body)] {
            if let Some(word) = forbidden_word(text) {
                return Err(ValidationError::ForbiddenWord {
                    field,
                    word: word.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn into_create_request(self) -> Result<CreatePostRequest, ValidationError> {
        self.validate()?;
        Ok(CreatePostRequest {
            title: self.title.trim().to_string(),
            body: self.body.trim().to_string(),
            category: self.category,
            tags: self.tags,
        })
    }

    /// Edit mode sends every field so cleared tags are cleared on the server too.
    pub fn into_update_request(self) -> Result<UpdatePostRequest, ValidationError> {
        self.validate()?;
        Ok(UpdatePostRequest {
            title: Some(self.title.trim().to_string()),
            body: Some(self.body.trim().to_string()),
            category: Some(self.category),
            tags: Some(self.tags),
        })
    }
}

fn forbidden_word(text: &str) -> Option<&'static str> {
    FORBIDDEN_WORDS.into_iter().find(|w| text.contains(w))
}
