//! Registration, disconnects and typing indicators.

use chathub_users::{RegisterRequest, UserError};
use tracing::{debug, info};

use super::{present, MessagingEngine, Outbound};
use crate::events::ServerEvent;

impl MessagingEngine {
    pub(super) fn register(
        &mut self,
        session: &str,
        email: Option<String>,
        name: Option<String>,
        username: Option<String>,
        avatar: Option<String>,
        out: &mut Vec<Outbound>,
    ) {
        let (Some(email), Some(name)) = (present(email), present(name)) else {
            return;
        };
        let request = RegisterRequest {
            email,
            name,
            username,
            avatar,
        };

        let user = match self.users.register(&mut self.handles, request) {
            Ok(user) => user,
            Err(error @ UserError::HandleTaken { .. }) => {
                debug!(session, %error, "registration rejected");
                out.push(Outbound::to(
                    session,
                    ServerEvent::RegistrationError {
                        message: error.to_string(),
                    },
                ));
                return;
            }
            Err(error) => {
                debug!(session, %error, "registration ignored");
                return;
            }
        };

        // A session that switches identity leaves its previous user behind offline.
        if let Some(previous) = self.sessions.user_of(session).cloned() {
            if previous != user.id {
                self.sessions.unbind(session);
                if let Some(left) = self.users.mark_offline(&previous) {
                    out.push(Outbound::everyone(ServerEvent::UserOffline {
                        user_id: left.id,
                        last_seen: left.last_seen,
                    }));
                }
            }
        }

        if let Some(evicted) = self.sessions.bind(session, &user.id) {
            debug!(user = %user.id, %evicted, "previous session no longer receives events");
        }

        out.push(Outbound::everyone(ServerEvent::UsersList(self.users.list())));
        out.push(Outbound::everyone(ServerEvent::GroupsList(self.groups.list())));
        out.push(Outbound::everyone(ServerEvent::UserOnline {
            user_id: user.id.clone(),
            online: true,
        }));
        info!(user = %user.id, handle = %user.username, session, "user registered");
    }

    /// Forget `session` and, if it was the user's live session, mark them offline.
    pub fn disconnect(&mut self, session: &str) -> Vec<Outbound> {
        let mut out = Vec::new();
        let Some(user_id) = self.sessions.unbind(session) else {
            return out;
        };
        if let Some(user) = self.users.mark_offline(&user_id) {
            info!(user = %user.id, session, "user went offline");
            out.push(Outbound::everyone(ServerEvent::UserOffline {
                user_id: user.id,
                last_seen: user.last_seen,
            }));
        }
        out
    }

    pub(super) fn typing(
        &mut self,
        sender_id: Option<String>,
        receiver_id: Option<String>,
        is_typing: Option<bool>,
        out: &mut Vec<Outbound>,
    ) {
        let (Some(sender_id), Some(receiver_id)) = (present(sender_id), present(receiver_id)) else {
            return;
        };
        if let Some(session) = self.online_session(&receiver_id) {
            out.push(Outbound::to(
                session,
                ServerEvent::UserTyping {
                    sender_id,
                    is_typing: is_typing.unwrap_or(false),
                },
            ));
        }
    }
}
