//! Off-chain content documents and the fields derived from them.

use crate::util::{Summary, summarize_md};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::{Deref, DerefMut};

/// Fields of a document that no typed content struct knows about.
pub type ContentFields = Map<String, Value>;

fn text_field<'a>(fields: &'a ContentFields, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

/// Accessors the content derivation reads from any document. Fields a document type does
/// not declare are looked up among its unknown fields.
pub trait CommonContent {
    fn about(&self) -> Option<&str> {
        None
    }

    fn body(&self) -> Option<&str> {
        None
    }

    fn title(&self) -> Option<&str> {
        None
    }

    fn other_fields_mut(&mut self) -> Option<&mut ContentFields> {
        None
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct SpaceContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    #[serde(flatten)]
    pub other: ContentFields,
}

impl CommonContent for SpaceContent {
    fn about(&self) -> Option<&str> {
        self.about.as_deref()
    }

    fn body(&self) -> Option<&str> {
        text_field(&self.other, "body")
    }

    fn title(&self) -> Option<&str> {
        text_field(&self.other, "title")
    }

    fn other_fields_mut(&mut self) -> Option<&mut ContentFields> {
        Some(&mut self.other)
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct PostContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    #[serde(flatten)]
    pub other: ContentFields,
}

impl CommonContent for PostContent {
    fn about(&self) -> Option<&str> {
        text_field(&self.other, "about")
    }

    fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn other_fields_mut(&mut self) -> Option<&mut ContentFields> {
        Some(&mut self.other)
    }
}

/// Comments share the post document layout.
pub type CommentContent = PostContent;

#[derive(Clone, Eq, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct ProfileContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(flatten)]
    pub other: ContentFields,
}

impl CommonContent for ProfileContent {
    fn about(&self) -> Option<&str> {
        self.about.as_deref()
    }

    fn body(&self) -> Option<&str> {
        text_field(&self.other, "body")
    }

    fn title(&self) -> Option<&str> {
        text_field(&self.other, "title")
    }

    fn other_fields_mut(&mut self) -> Option<&mut ContentFields> {
        Some(&mut self.other)
    }
}

impl CommonContent for ContentFields {
    fn about(&self) -> Option<&str> {
        text_field(self, "about")
    }

    fn body(&self) -> Option<&str> {
        text_field(self, "body")
    }

    fn title(&self) -> Option<&str> {
        text_field(self, "title")
    }

    fn other_fields_mut(&mut self) -> Option<&mut ContentFields> {
        Some(self)
    }
}

/// A content document extended with its summary.
#[derive(Clone, Eq, PartialEq, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedContent<C> {
    #[serde(flatten)]
    pub content: C,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub is_show_more: bool,
}

impl<C> Deref for DerivedContent<C> {
    type Target = C;

    fn deref(&self) -> &Self::Target {
        &self.content
    }
}

impl<C> DerefMut for DerivedContent<C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.content
    }
}

/// Adds a summary of the first non-empty of `about`, `body` and `title` to the document.
///
/// Every field of the document is kept; derived fields replace same-named ones.
#[must_use]
pub fn convert_to_derived_content<C: CommonContent>(content: Option<C>) -> Option<DerivedContent<C>> {
    let mut content = content?;

    let markdown = [content.about(), content.body(), content.title()]
        .into_iter()
        .flatten()
        .find(|text| !text.trim().is_empty());
    let Summary {
        summary,
        is_show_more,
    } = markdown.map(summarize_md).unwrap_or_default();

    if let Some(other) = content.other_fields_mut() {
        other.remove("summary");
        other.remove("isShowMore");
    }

    Some(DerivedContent {
        content,
        summary,
        is_show_more,
    })
}
