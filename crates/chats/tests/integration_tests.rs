//! Integration tests for the chats crate: groups and logs sharing the handle
//! namespace with users.

use chathub_chats::{
    ChatError, ChatKey, ChatMessage, ChatStore, CreateGroupRequest, GroupRegistry, GroupType,
};
use chathub_users::{HandleRegistry, RegisterRequest, UserDirectory};

#[test]
fn test_group_handle_conflicts_with_user_handle() {
    let mut handles = HandleRegistry::new();
    let mut users = UserDirectory::new();
    let mut groups = GroupRegistry::new();
    users
        .register(&mut handles, RegisterRequest::new("alice@x.io", "Alice"))
        .unwrap();

    let error = groups
        .create(&mut handles, CreateGroupRequest::new("Alice fans", "@alice", "b@x"))
        .unwrap_err();

    assert!(error.is_conflict());
    assert_eq!(error.to_string(), "@alice is already taken!");
    assert!(groups.is_empty());
}

#[test]
fn test_group_conversation_flow() {
    let mut handles = HandleRegistry::new();
    let mut groups = GroupRegistry::new();
    let mut store = ChatStore::new();

    let group = groups
        .create(
            &mut handles,
            CreateGroupRequest::new("News", "news", "a@x").with_type(GroupType::Channel),
        )
        .unwrap();
    let key = ChatKey::group(&group.id);

    for _ in 0..3 {
        groups.ensure_member(&group.id, "b@x").unwrap();
        store.append(
            key.clone(),
            ChatMessage::group("b@x", &group.id, "hello", None, None),
        );
    }

    let stored = groups.get(&group.id).unwrap();
    assert_eq!(stored.members.iter().filter(|m| *m == "b@x").count(), 1);
    assert_eq!(store.history(&key).len(), 3);
    assert_eq!(ChatKey::parse(&group.id), Some(key));
}

#[test]
fn test_delete_for_everyone_hides_message_from_both_sides() {
    let mut store = ChatStore::new();
    let message = store.append(
        ChatKey::direct("a@x", "b@x"),
        ChatMessage::direct("a@x", "b@x", "oops", None, None),
    );
    let client_key = ChatKey::parse("b@x::a@x").unwrap();

    assert!(matches!(
        store.remove(&client_key, &message.id, "b@x"),
        Err(ChatError::AccessDenied { .. })
    ));
    store.remove(&client_key, &message.id, "a@x").unwrap();

    assert!(store.history(&ChatKey::direct("a@x", "b@x")).is_empty());
    assert!(store.history(&ChatKey::direct("b@x", "a@x")).is_empty());
}
