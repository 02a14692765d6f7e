//! Groups and channels.

use chathub_chats::{ChatError, ChatKey, ChatMessage, CreateGroupRequest, GroupType};
use tracing::debug;

use super::{client_timestamp, present, MessagingEngine, Outbound};
use crate::events::ServerEvent;

impl MessagingEngine {
    pub(super) fn create_group(
        &mut self,
        session: &str,
        name: Option<String>,
        username: Option<String>,
        group_type: Option<String>,
        created_by: Option<String>,
        out: &mut Vec<Outbound>,
    ) {
        let (Some(name), Some(username), Some(created_by)) =
            (present(name), present(username), present(created_by))
        else {
            return;
        };
        let request = CreateGroupRequest::new(name, username, created_by)
            .with_type(group_type.as_deref().map(GroupType::from).unwrap_or_default());

        match self.groups.create(&mut self.handles, request) {
            Ok(group) => {
                out.push(Outbound::everyone(ServerEvent::NewGroup(group.clone())));
                out.push(Outbound::to(session, ServerEvent::GroupCreated(group)));
            }
            Err(error) if error.is_conflict() => {
                out.push(Outbound::to(
                    session,
                    ServerEvent::GroupError {
                        message: error.to_string(),
                    },
                ));
            }
            Err(error) => debug!(session, %error, "group creation ignored"),
        }
    }

    pub(super) fn join_group(&mut self, group_id: Option<String>, user_id: Option<String>, out: &mut Vec<Outbound>) {
        let (Some(group_id), Some(user_id)) = (present(group_id), present(user_id)) else {
            return;
        };
        if let Some(group) = self.groups.join(&group_id, &user_id) {
            out.push(Outbound::everyone(ServerEvent::GroupUpdated(group.clone())));
        }
    }

    pub(super) fn leave_group(
        &mut self,
        session: &str,
        group_id: Option<String>,
        user_id: Option<String>,
        out: &mut Vec<Outbound>,
    ) {
        let (Some(group_id), Some(user_id)) = (present(group_id), present(user_id)) else {
            return;
        };
        if let Some(group) = self.groups.leave(&group_id, &user_id) {
            out.push(Outbound::everyone(ServerEvent::GroupUpdated(group.clone())));
            out.push(Outbound::to(session, ServerEvent::LeftGroup { group_id }));
        }
    }

    pub(super) fn send_group(
        &mut self,
        group_id: Option<String>,
        sender_id: Option<String>,
        text: Option<String>,
        timestamp: Option<serde_json::Value>,
        reply_to: Option<serde_json::Value>,
        out: &mut Vec<Outbound>,
    ) {
        let (Some(group_id), Some(sender_id), Some(text)) =
            (present(group_id), present(sender_id), present(text))
        else {
            return;
        };

        match self.groups.ensure_member(&group_id, &sender_id) {
            Ok(true) => {
                if let Some(group) = self.groups.get(&group_id) {
                    out.push(Outbound::everyone(ServerEvent::GroupUpdated(group.clone())));
                }
            }
            Ok(false) => {}
            Err(ChatError::GroupNotFound { .. }) => {
                debug!(group = %group_id, "message to unknown group ignored");
                return;
            }
            Err(error) => {
                debug!(group = %group_id, %error, "group message ignored");
                return;
            }
        }

        let message = ChatMessage::group(
            &sender_id,
            &group_id,
            &text,
            client_timestamp(timestamp),
            reply_to,
        );
        let key = ChatKey::group(group_id.as_str());
        let stored = self.chats.append(key.clone(), message);

        let Some(group) = self.groups.get(&group_id).cloned() else {
            return;
        };
        self.notify_participants(
            &key,
            ServerEvent::ReceiveGroupMessage {
                message: stored,
                group,
            },
            out,
        );
    }

    pub(super) fn group_history(&self, session: &str, group_id: Option<String>, out: &mut Vec<Outbound>) {
        let Some(group_id) = present(group_id) else {
            return;
        };
        let history = self.chats.history(&ChatKey::group(group_id));
        out.push(Outbound::to(session, ServerEvent::GroupMessagesHistory(history)));
    }
}

#[cfg(test)]
mod tests {
    use super::super::Delivery;
    use super::*;
    use crate::events::ClientEvent;
    use chathub_chats::Group;

    fn register(engine: &mut MessagingEngine, session: &str, email: &str) {
        engine.handle(
            session,
            ClientEvent::Register {
                email: Some(email.into()),
                name: Some(email.into()),
                username: None,
                avatar: None,
            },
        );
    }

    fn create(engine: &mut MessagingEngine, session: &str, handle: &str, creator: &str) -> Vec<Outbound> {
        engine.handle(
            session,
            ClientEvent::CreateGroup {
                name: Some("Team".into()),
                username: Some(handle.into()),
                group_type: None,
                created_by: Some(creator.into()),
            },
        )
    }

    fn created_group(out: &[Outbound]) -> Group {
        match &out[1].event {
            ServerEvent::GroupCreated(group) => group.clone(),
            other => panic!("expected group-created, got {other:?}"),
        }
    }

    fn send(group_id: &str, sender: &str) -> ClientEvent {
        ClientEvent::SendGroupMessage {
            group_id: Some(group_id.into()),
            sender_id: Some(sender.into()),
            text: Some("hello".into()),
            timestamp: None,
            reply_to: None,
        }
    }

    #[test]
    fn create_broadcasts_and_acknowledges() {
        let mut engine = MessagingEngine::new();
        register(&mut engine, "s1", "a@x");

        let out = create(&mut engine, "s1", "@team", "a@x");

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].delivery, Delivery::Everyone);
        assert_eq!(out[0].event.name(), "new-group");
        assert_eq!(out[1].delivery, Delivery::Session("s1".into()));
        let group = created_group(&out);
        assert_eq!(group.members, ["a@x"]);
        assert_eq!(group.admins, ["a@x"]);
    }

    #[test]
    fn second_create_with_same_handle_gets_group_error() {
        let mut engine = MessagingEngine::new();
        create(&mut engine, "s1", "team", "a@x");

        let out = create(&mut engine, "s2", "@team", "b@x");

        assert_eq!(
            out,
            vec![Outbound::to(
                "s2",
                ServerEvent::GroupError {
                    message: "@team is already taken!".into()
                }
            )]
        );
        assert_eq!(engine.stats().groups, 1);
    }

    #[test]
    fn join_always_broadcasts() {
        let mut engine = MessagingEngine::new();
        let group = created_group(&create(&mut engine, "s1", "team", "a@x"));
        let join = || ClientEvent::JoinGroup {
            group_id: Some(group.id.clone()),
            user_id: Some("b@x".into()),
        };

        let first = engine.handle("s2", join());
        let second = engine.handle("s2", join());

        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
        let ServerEvent::GroupUpdated(updated) = &first[0].event else {
            panic!("expected group-updated");
        };
        assert_eq!(updated.members, ["a@x", "b@x"]);
        assert!(engine
            .handle(
                "s2",
                ClientEvent::JoinGroup {
                    group_id: Some("g_missing".into()),
                    user_id: Some("b@x".into())
                }
            )
            .is_empty());
    }

    #[test]
    fn leave_broadcasts_and_acknowledges() {
        let mut engine = MessagingEngine::new();
        let group = created_group(&create(&mut engine, "s1", "team", "a@x"));

        let out = engine.handle(
            "s1",
            ClientEvent::LeaveGroup {
                group_id: Some(group.id.clone()),
                user_id: Some("a@x".into()),
            },
        );

        assert_eq!(out.len(), 2);
        let ServerEvent::GroupUpdated(updated) = &out[0].event else {
            panic!("expected group-updated");
        };
        assert!(updated.members.is_empty() && updated.admins.is_empty());
        assert_eq!(
            out[1],
            Outbound::to("s1", ServerEvent::LeftGroup { group_id: group.id })
        );
    }

    #[test]
    fn non_member_sender_is_auto_joined_once() {
        let mut engine = MessagingEngine::new();
        register(&mut engine, "s1", "a@x");
        register(&mut engine, "s2", "b@x");
        let group = created_group(&create(&mut engine, "s1", "team", "a@x"));

        let first = engine.handle("s2", send(&group.id, "b@x"));
        let second = engine.handle("s2", send(&group.id, "b@x"));

        let first_names: Vec<_> = first.iter().map(|outbound| outbound.event.name()).collect();
        assert_eq!(
            first_names,
            ["group-updated", "receive-group-message", "receive-group-message"]
        );
        assert!(second.iter().all(|outbound| outbound.event.name() == "receive-group-message"));

        let history = engine.handle(
            "s1",
            ClientEvent::GetGroupMessages {
                group_id: Some(group.id.clone()),
            },
        );
        let ServerEvent::GroupMessagesHistory(messages) = &history[0].event else {
            panic!("expected history");
        };
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn group_message_reaches_online_members_including_sender() {
        let mut engine = MessagingEngine::new();
        register(&mut engine, "s1", "a@x");
        register(&mut engine, "s2", "b@x");
        let group = created_group(&create(&mut engine, "s1", "team", "a@x"));
        engine.handle(
            "s2",
            ClientEvent::JoinGroup {
                group_id: Some(group.id.clone()),
                user_id: Some("b@x".into()),
            },
        );
        engine.handle(
            "s1",
            ClientEvent::JoinGroup {
                group_id: Some(group.id.clone()),
                user_id: Some("c@x".into()),
            },
        );

        let out = engine.handle("s1", send(&group.id, "a@x"));

        let targets: Vec<_> = out.iter().map(|outbound| outbound.delivery.clone()).collect();
        assert_eq!(
            targets,
            [Delivery::Session("s1".into()), Delivery::Session("s2".into())]
        );
        let ServerEvent::ReceiveGroupMessage { message, group: snapshot } = &out[0].event else {
            panic!("expected receive-group-message");
        };
        assert_eq!(message.group_id.as_deref(), Some(group.id.as_str()));
        assert_eq!(snapshot.members, ["a@x", "b@x", "c@x"]);
    }

    #[test]
    fn message_to_unknown_group_is_ignored() {
        let mut engine = MessagingEngine::new();
        assert!(engine.handle("s1", send("g_missing", "a@x")).is_empty());
        assert_eq!(engine.stats().messages, 0);
    }
}
