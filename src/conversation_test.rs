use super::*;

fn filled(n: usize) -> Conversation {
    let mut conversation = Conversation::default();
    for i in 0..n {
        if i % 2 == 0 {
            conversation.push(ChatMessage::assistant(format!("a{i}")));
        } else {
            conversation.push(ChatMessage::user(format!("u{i}")));
        }
    }
    conversation
}

#[test]
fn conversation_starts_empty() {
    let conversation = Conversation::default();
    assert!(conversation.messages().is_empty());
    assert!(conversation.context().is_empty());
}

#[test]
fn push_preserves_arrival_order() {
    let mut conversation = Conversation::default();
    conversation.push(ChatMessage::assistant("Hello"));
    conversation.push(ChatMessage::user("price?"));
    conversation.push(ChatMessage::assistant("Our prices start at $50"));
    assert_eq!(
        conversation.messages(),
        &[
            ChatMessage::assistant("Hello"),
            ChatMessage::user("price?"),
            ChatMessage::assistant("Our prices start at $50"),
        ]
    );
}

#[test]
fn request_for_short_history_sends_everything() {
    let conversation = filled(3);
    let request = conversation.request_for(&ChatMessage::user("next"));
    assert_eq!(request.messages.len(), 4);
    assert_eq!(request.messages[0].content, "a0");
    assert_eq!(request.messages[3], ChatMessage::user("next"));
}

#[test]
fn request_for_long_history_keeps_only_newest_window() {
    let conversation = filled(25);
    let request = conversation.request_for(&ChatMessage::user("next"));
    assert_eq!(request.messages.len(), CONTEXT_WINDOW + 1);
    assert_eq!(&request.messages[..CONTEXT_WINDOW], &conversation.messages()[15..]);
    assert_eq!(request.messages.last(), Some(&ChatMessage::user("next")));
}

#[test]
fn request_for_exact_window_sends_all_stored() {
    let conversation = filled(CONTEXT_WINDOW);
    let request = conversation.request_for(&ChatMessage::user("next"));
    assert_eq!(request.messages.len(), CONTEXT_WINDOW + 1);
    assert_eq!(request.messages[0].content, "a0");
}

#[test]
fn request_for_does_not_store_message() {
    let conversation = filled(2);
    let _ = conversation.request_for(&ChatMessage::user("next"));
    assert_eq!(conversation.messages().len(), 2);
}

#[test]
fn request_serializes_to_wire_shape() {
    let request = ChatRequest { messages: vec![ChatMessage::assistant("Hi"), ChatMessage::user("price?")] };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "messages": [
                { "role": "assistant", "content": "Hi" },
                { "role": "user", "content": "price?" }
            ]
        })
    );
}
