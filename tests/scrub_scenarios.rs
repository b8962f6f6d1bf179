use adscrub::paths::TIMELINE_PATHS;
use adscrub::prelude::*;
use serde_json::{json, Value};
use std::borrow::Cow;

fn engine() -> ScrubEngine {
    ScrubEngine::with_defaults().unwrap()
}

fn tweet(id: &str) -> Value {
    json!({
        "entryId": id,
        "sortIndex": "1000",
        "content": {
            "entryType": "TimelineTimelineItem",
            "itemContent": {"tweet_results": {"result": {"rest_id": id}}}
        }
    })
}

fn promoted_tweet(id: &str) -> Value {
    json!({
        "entryId": id,
        "sortIndex": "999",
        "content": {
            "entryType": "TimelineTimelineItem",
            "itemContent": {
                "tweet_results": {"result": {}},
                "promoted_metadata": {"advertiser_results": {}}
            }
        }
    })
}

fn home_doc(entries: Vec<Value>) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "data": {
            "home": {
                "home_timeline_urt": {
                    "instructions": [
                        {"type": "TimelineAddEntries", "entries": entries},
                        {"type": "TimelineTerminateTimeline", "direction": "Bottom"}
                    ]
                }
            }
        }
    }))
    .unwrap()
}

fn home_entries(body: &[u8]) -> Vec<Value> {
    let doc: Value = serde_json::from_slice(body).unwrap();
    doc["data"]["home"]["home_timeline_urt"]["instructions"][0]["entries"]
        .as_array()
        .unwrap()
        .clone()
}

#[test]
fn scenario_a_promoted_entry_removed_order_kept() {
    let body = home_doc(vec![
        tweet("tweet-1"),
        tweet("tweet-2"),
        promoted_tweet("promoted-tweet-123"),
        tweet("tweet-4"),
        tweet("tweet-5"),
    ]);

    let out = engine().scrub(&body);
    let entries = home_entries(&out);
    let ids: Vec<&str> = entries
        .iter()
        .map(|e| e["entryId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["tweet-1", "tweet-2", "tweet-4", "tweet-5"]);
}

#[test]
fn scenario_a_neutralize_variant_keeps_placeholder() {
    let config = ConfigBuilder::new()
        .strategy(Strategy::Neutralize)
        .build()
        .unwrap();
    let engine = ScrubEngine::new(config).unwrap();

    let body = home_doc(vec![
        tweet("tweet-1"),
        promoted_tweet("promoted-tweet-123"),
        tweet("tweet-3"),
    ]);

    let out = engine.scrub(&body);
    let entries = home_entries(&out);
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1]["entryId"], "promoted-tweet-123");
    // Promotional payload stripped from the placeholder
    assert!(entries[1]["content"].get("itemContent").is_none());
}

#[test]
fn scenario_b_all_ads_guard_passes_input_through() {
    let body = home_doc(vec![
        promoted_tweet("promoted-tweet-1"),
        promoted_tweet("promoted-tweet-2"),
        promoted_tweet("promoted-tweet-3"),
    ]);

    let out = engine().scrub(&body);
    assert!(matches!(out, Cow::Borrowed(_)));
    assert_eq!(&*out, body.as_slice());
}

#[test]
fn all_ad_instructions_guard_passes_input_through() {
    // Every instruction carries a singular ad entry, so dropping them all
    // would empty the instruction array; the guard keeps the document intact
    let body = serde_json::to_vec(&json!({
        "data": {
            "home": {
                "home_timeline_urt": {
                    "instructions": [
                        {
                            "type": "TimelineAddToModule",
                            "entry": {"entryId": "promoted-tweet-1", "content": {"itemContent": {}}}
                        },
                        {
                            "type": "TimelineAddToModule",
                            "entry": {"entryId": "promoted-tweet-2", "content": {"itemContent": {}}}
                        }
                    ]
                }
            }
        }
    }))
    .unwrap();

    let out = engine().scrub(&body);
    assert!(matches!(out, Cow::Borrowed(_)));
    assert_eq!(&*out, body.as_slice());
}

#[test]
fn scenario_c_card_kept_in_thread_context() {
    let card_entry = json!({
        "entryId": "tweet-77",
        "content": {
            "entryType": "TimelineTimelineItem",
            "itemContent": {"card": {"legacy": {"name": "poll2choice_text_only"}}}
        }
    });
    let body = serde_json::to_vec(&json!({
        "data": {
            "threaded_conversation_with_injections_v2": {
                "instructions": [{
                    "type": "TimelineAddEntries",
                    "entries": [tweet("tweet-1"), card_entry]
                }]
            }
        }
    }))
    .unwrap();

    let out = engine().scrub(&body);
    assert_eq!(&*out, body.as_slice());
}

#[test]
fn card_entry_removed_outside_thread_context() {
    let card_entry = json!({
        "entryId": "tweet-77",
        "content": {
            "entryType": "TimelineTimelineItem",
            "itemContent": {"card": {"legacy": {"name": "some_website_card"}}}
        }
    });
    let body = home_doc(vec![tweet("tweet-1"), card_entry]);

    let out = engine().scrub(&body);
    let entries = home_entries(&out);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["entryId"], "tweet-1");
}

#[test]
fn scenario_d_emptied_module_dropped() {
    let module = json!({
        "entryId": "adcarousel-9",
        "content": {
            "entryType": "TimelineTimelineItem",
            "items": [
                {"entryId": "adcarousel-9-item-1", "item": {"itemContent": {"promotedMetadata": {}}}},
                {"entryId": "adcarousel-9-item-2", "item": {"itemContent": {"promoted": true}}}
            ]
        }
    });
    let body = home_doc(vec![tweet("tweet-1"), module, tweet("tweet-3")]);

    let out = engine().scrub(&body);
    let ids: Vec<String> = home_entries(&out)
        .iter()
        .map(|e| e["entryId"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["tweet-1", "tweet-3"]);
}

#[test]
fn essential_entries_are_invariant() {
    let cursor = json!({
        "entryId": "cursor-bottom-42",
        "sortIndex": "0",
        "content": {
            "entryType": "TimelineTimelineCursor",
            "value": "HCaAgICs7dHx0i0AAA==",
            "cursorType": "Bottom"
        }
    });
    let body = home_doc(vec![
        tweet("tweet-1"),
        promoted_tweet("promoted-tweet-2"),
        cursor.clone(),
    ]);

    let out = engine().scrub(&body);
    let entries = home_entries(&out);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1], cursor);
}

#[test]
fn idempotence_remove_strategy() {
    let body = home_doc(vec![
        tweet("tweet-1"),
        promoted_tweet("promoted-tweet-2"),
        tweet("tweet-3"),
    ]);

    let engine = engine();
    let once = engine.scrub(&body).into_owned();
    let twice = engine.scrub(&once);
    // Second pass finds nothing left to do and borrows its input back
    assert!(matches!(twice, Cow::Borrowed(_)));
    assert_eq!(&*twice, once.as_slice());
}

#[test]
fn idempotence_neutralize_strategy() {
    let config = ConfigBuilder::new()
        .strategy(Strategy::Neutralize)
        .build()
        .unwrap();
    let engine = ScrubEngine::new(config).unwrap();

    let body = home_doc(vec![tweet("tweet-1"), promoted_tweet("promoted-tweet-2")]);
    let once = engine.scrub(&body).into_owned();
    let twice = engine.scrub(&once);
    assert!(matches!(twice, Cow::Borrowed(_)));
    assert_eq!(&*twice, once.as_slice());
}

#[test]
fn malformed_input_passes_through() {
    let engine = engine();
    for body in [
        b"not json at all".as_slice(),
        b"{\"truncated\": ".as_slice(),
        b"".as_slice(),
    ] {
        let out = engine.scrub(body);
        assert_eq!(&*out, body);
    }
}

#[test]
fn every_known_timeline_path_is_probed() {
    let engine = engine();
    for path in TIMELINE_PATHS {
        let instructions = json!([{
            "type": "TimelineAddEntries",
            "entries": [tweet("tweet-1"), promoted_tweet("promoted-tweet-2")]
        }]);
        let wrapped = path
            .segments
            .iter()
            .rev()
            .fold(instructions, |acc, segment| {
                let mut object = serde_json::Map::new();
                object.insert(segment.to_string(), acc);
                Value::Object(object)
            });
        let body = serde_json::to_vec(&json!({ "data": wrapped })).unwrap();

        let out = engine.scrub(&body);
        assert!(
            matches!(out, Cow::Owned(_)),
            "path {:?} was not filtered",
            path.segments
        );
    }
}

#[test]
fn thread_views_suppress_cards_but_not_promotions() {
    let body = serde_json::to_vec(&json!({
        "data": {
            "threaded_conversation_with_injections_v2": {
                "instructions": [{
                    "type": "TimelineAddEntries",
                    "entries": [
                        {
                            "entryId": "tweet-1",
                            "content": {"itemContent": {"tweetDisplayType": "TweetDetail"}}
                        },
                        promoted_tweet("promoted-tweet-2"),
                        {
                            "entryId": "conversationthread-3",
                            "content": {"items": [
                                {"entryId": "conversationthread-3-tweet-a", "item": {"itemContent": {"card": {}}}}
                            ]}
                        }
                    ]
                }]
            }
        }
    }))
    .unwrap();

    let out = engine().scrub(&body);
    let doc: Value = serde_json::from_slice(&out).unwrap();
    let entries = doc["data"]["threaded_conversation_with_injections_v2"]["instructions"][0]
        ["entries"]
        .as_array()
        .unwrap();
    // Promoted reply removed, detail focus and card-bearing thread kept
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["entryId"], "tweet-1");
    assert_eq!(entries[1]["entryId"], "conversationthread-3");
    assert_eq!(
        entries[1]["content"]["items"].as_array().unwrap().len(),
        1
    );
}

#[test]
fn top_level_arrays_never_come_back_empty() {
    // Even when every entry matches the ad heuristics, the served timeline
    // keeps its entries
    let body = home_doc(vec![
        promoted_tweet("promoted-tweet-1"),
        promoted_tweet("promoted-tweet-2"),
    ]);
    let out = engine().scrub(&body);
    assert_eq!(home_entries(&out).len(), 2);
}
