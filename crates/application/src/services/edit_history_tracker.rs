//! 编辑历史追踪器
//!
//! 在 `MessageEdited` 事件（更新提交之前发布）中捕获编辑前的内容。
//! 历史捕获是主要副作用：写入失败向上传播，中止本次编辑。

use crate::dispatcher::EventHandler;
use crate::errors::ApplicationResult;
use async_trait::async_trait;
use domain::events::{EventKind, MessageEvent};
use domain::repositories::MessageHistoryRepository;
use domain::MessageHistory;
use std::sync::Arc;
use tracing::debug;

/// 编辑历史追踪器
pub struct EditHistoryTracker {
    history_repository: Arc<dyn MessageHistoryRepository>,
}

impl EditHistoryTracker {
    pub fn new(history_repository: Arc<dyn MessageHistoryRepository>) -> Self {
        Self { history_repository }
    }
}

#[async_trait]
impl EventHandler for EditHistoryTracker {
    fn name(&self) -> &'static str {
        "edit_history_tracker"
    }

    fn interested_in(&self, kind: EventKind) -> bool {
        kind == EventKind::MessageEdited
    }

    async fn handle(&self, event: &MessageEvent) -> ApplicationResult<()> {
        let MessageEvent::MessageEdited { old, new } = event else {
            return Ok(());
        };

        // old 来自提交前的存储读出，是权威的旧内容
        if old.content == new.content {
            return Ok(());
        }

        let history = MessageHistory::new(new.id, old.content.clone());
        self.history_repository.insert(&history).await?;
        debug!(message_id = %new.id, history_id = %history.id, "编辑历史已捕获");

        Ok(())
    }
}
