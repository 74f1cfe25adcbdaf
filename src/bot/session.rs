//! Per-user navigation state.
//!
//! Each Discord user gets their own [`Shell`], so one person's open form or active
//! section never leaks into another's. Shells are never evicted: the map grows by one
//! small entry per user who has used the bot since start. Restarting the process
//! clears it.

use crate::core::shell::Shell;
use poise::serenity_prelude::UserId;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;

/// Navigation shells keyed by user.
#[derive(Default)]
pub struct Sessions {
    shells: Mutex<HashMap<UserId, Arc<Mutex<Shell>>>>,
}

impl Sessions {
    /// The shell of `user`, created on first use at the dashboard.
    pub async fn shell(&self, user: UserId) -> Arc<Mutex<Shell>> {
        let mut shells = self.shells.lock().await;
        Arc::clone(shells.entry(user).or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shell::Section;

    #[tokio::test]
    async fn test_shells_are_per_user() {
        let sessions = Sessions::default();
        let alice = UserId::new(1);
        let bob = UserId::new(2);

        sessions.shell(alice).await.lock().await.select(Section::Setor);

        assert_eq!(sessions.shell(alice).await.lock().await.active(), Section::Setor);
        assert_eq!(sessions.shell(bob).await.lock().await.active(), Section::Dashboard);
    }

    #[tokio::test]
    async fn test_repeat_lookups_reuse_one_shell() {
        let sessions = Sessions::default();
        let user = UserId::new(7);
        let first = sessions.shell(user).await;
        for _ in 0..10 {
            assert!(Arc::ptr_eq(&first, &sessions.shell(user).await));
        }
        assert_eq!(sessions.shells.lock().await.len(), 1);
    }
}
