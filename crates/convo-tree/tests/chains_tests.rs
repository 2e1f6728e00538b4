use convo_tree::{ChainsResponse, TweetIndex};

const RESPONSE: &str = r#"{
  "data": {
    "allTweets": {
      "t1": {"text": "first", "authorName": "ann", "createdAt": "2023-01-01"},
      "t2": {"text": "reply https://x.io/p", "authorName": "bo", "createdAt": "2023-01-02",
             "photos": ["https://img/1.png"]}
    },
    "conversationChains": [["t1", "t2"], ["t1", "missing"]],
    "totalConversationsCount": 12,
    "lastRunAt": "2023-01-03T10:00:00Z"
  }
}"#;

#[test]
fn test_parses_full_response() {
    let resp: ChainsResponse = serde_json::from_str(RESPONSE).unwrap();
    let data = resp.data.unwrap();
    assert_eq!(data.total(), 12);
    assert_eq!(data.last_run_at, "2023-01-03T10:00:00Z");
    assert_eq!(data.conversation_chains.len(), 2);
    assert_eq!(data.all_tweets.len(), 2);
}

#[test]
fn test_missing_data_means_no_run_yet() {
    let resp: ChainsResponse = serde_json::from_str("{}").unwrap();
    assert!(resp.data.is_none());
}

#[test]
fn test_resolve_chain_in_order() {
    let data = serde_json::from_str::<ChainsResponse>(RESPONSE).unwrap().data.unwrap();
    let chain = data.resolve_chain(0).unwrap();
    let authors: Vec<&str> = chain.iter().map(|(_, t)| t.author_name.as_str()).collect();
    assert_eq!(authors, vec!["ann", "bo"]);
    assert_eq!(chain[1].1.photo_urls(), ["https://img/1.png".to_string()]);
    assert!(chain[0].1.photo_urls().is_empty());
}

#[test]
fn test_unknown_tweet_ids_are_skipped() {
    let data = serde_json::from_str::<ChainsResponse>(RESPONSE).unwrap().data.unwrap();
    let chain = data.resolve_chain(1).unwrap();
    assert_eq!(chain.len(), 1);
    assert_eq!(chain[0].0, "t1");
}

#[test]
fn test_out_of_range_chain_is_none() {
    let data = serde_json::from_str::<ChainsResponse>(RESPONSE).unwrap().data.unwrap();
    assert!(data.resolve_chain(2).is_none());
}

#[test]
fn test_tweets_as_array_are_indexed_by_position() {
    let json = r#"{"data": {
        "allTweets": [
            {"text": "zero", "authorName": "a", "createdAt": "x"},
            {"text": "one", "authorName": "b", "createdAt": "y"}
        ],
        "conversationChains": [["1", "0"]],
        "lastRunAt": "now"
    }}"#;
    let data = serde_json::from_str::<ChainsResponse>(json).unwrap().data.unwrap();
    assert!(matches!(data.all_tweets, TweetIndex::ByPosition(_)));
    let texts: Vec<&str> = data
        .resolve_chain(0)
        .unwrap()
        .iter()
        .map(|(_, t)| t.text.as_str())
        .collect();
    assert_eq!(texts, vec!["one", "zero"]);
    // no explicit total: falls back to the chains shipped
    assert_eq!(data.total(), 1);
}
