//! Payload of the precomputed-chains endpoint.
//!
//! The server walks its own tweet graph and ships every conversation as a
//! list of tweet ids plus a lookup of the tweets themselves. An absent
//! `data` field means the server has not completed a run yet.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tweet {
    pub text: String,
    pub author_name: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
}

impl Tweet {
    /// Photo URLs, empty when the field is missing.
    pub fn photo_urls(&self) -> &[String] {
        self.photos.as_deref().unwrap_or(&[])
    }
}

/// Tweets addressed by id: a JSON object keyed by id, or an array whose
/// positions are the ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TweetIndex {
    ById(HashMap<String, Tweet>),
    ByPosition(Vec<Tweet>),
}

impl Default for TweetIndex {
    fn default() -> Self {
        Self::ById(HashMap::new())
    }
}

impl TweetIndex {
    pub fn get(&self, id: &str) -> Option<&Tweet> {
        match self {
            Self::ById(map) => map.get(id),
            Self::ByPosition(list) => id.parse::<usize>().ok().and_then(|i| list.get(i)),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::ById(map) => map.len(),
            Self::ByPosition(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainsPayload {
    #[serde(default)]
    pub all_tweets: TweetIndex,
    #[serde(default)]
    pub conversation_chains: Vec<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_conversations_count: Option<usize>,
    #[serde(default)]
    pub last_run_at: String,
}

impl ChainsPayload {
    /// Total reported by the server, falling back to the chains shipped.
    pub fn total(&self) -> usize {
        self.total_conversations_count
            .unwrap_or(self.conversation_chains.len())
    }

    /// Tweets of chain `index`, in order. Ids missing from the lookup are
    /// logged and skipped. `None` when the chain does not exist.
    pub fn resolve_chain(&self, index: usize) -> Option<Vec<(&str, &Tweet)>> {
        let Some(chain) = self.conversation_chains.get(index) else {
            tracing::debug!(index, chains = self.conversation_chains.len(), "No conversation chain at index");
            return None;
        };

        let tweets = chain
            .iter()
            .filter_map(|id| match self.all_tweets.get(id) {
                Some(tweet) => Some((id.as_str(), tweet)),
                None => {
                    tracing::warn!(tweet_id = %id, chain = index, "Chain references unknown tweet");
                    None
                }
            })
            .collect();
        Some(tweets)
    }
}

/// Top-level response envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ChainsPayload>,
}
