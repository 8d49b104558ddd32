use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::UnknownVariant;

/// Where a piece of content is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    BlogNaver,
    BlogTistory,
    Instagram,
    Facebook,
    Youtube,
    Linkedin,
    Threads,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::BlogNaver => "blog_naver",
            Channel::BlogTistory => "blog_tistory",
            Channel::Instagram => "instagram",
            Channel::Facebook => "facebook",
            Channel::Youtube => "youtube",
            Channel::Linkedin => "linkedin",
            Channel::Threads => "threads",
        }
    }

    /// Human-readable name used in prompts and notification text.
    pub fn display_name(&self) -> &'static str {
        match self {
            Channel::BlogNaver => "네이버 블로그",
            Channel::BlogTistory => "티스토리 블로그",
            Channel::Instagram => "인스타그램",
            Channel::Facebook => "페이스북",
            Channel::Youtube => "유튜브",
            Channel::Linkedin => "링크드인",
            Channel::Threads => "스레드",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blog_naver" => Ok(Channel::BlogNaver),
            "blog_tistory" => Ok(Channel::BlogTistory),
            "instagram" => Ok(Channel::Instagram),
            "facebook" => Ok(Channel::Facebook),
            "youtube" => Ok(Channel::Youtube),
            "linkedin" => Ok(Channel::Linkedin),
            "threads" => Ok(Channel::Threads),
            other => Err(UnknownVariant::new("channel", other)),
        }
    }
}

impl TryFrom<String> for Channel {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
