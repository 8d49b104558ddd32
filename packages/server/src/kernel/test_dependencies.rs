// TestDependencies - in-memory implementations for testing
//
// Provides a datastore, AI and messenger that can be injected into
// ServerDeps so routes and activities run without Postgres or OpenAI.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::{
    BaseAI, BaseAdvertiserStore, BaseContentStore, BaseMessenger, BaseNotificationStore,
    BasePreviewStore, ServerDeps,
};
use crate::common::{AdvertiserId, ContentId, NotificationId, OperatorId};
use crate::domains::advertisers::{Advertiser, NewAdvertiser};
use crate::domains::auth::JwtService;
use crate::domains::contents::models::{
    Content, ContentFilter, ContentStatus, NewContent, PreviewToken,
};
use crate::domains::notifications::{NewNotification, Notification};

pub const TEST_JWT_SECRET: &str = "test_secret";
pub const TEST_JWT_ISSUER: &str = "test_issuer";
pub const TEST_PREVIEW_BASE_URL: &str = "https://preview.test";

// =============================================================================
// In-memory datastore
// =============================================================================

#[derive(Default)]
pub struct InMemoryStore {
    advertisers: Mutex<Vec<Advertiser>>,
    contents: Mutex<Vec<Content>>,
    notifications: Mutex<Vec<Notification>>,
    fail_notification_inserts: AtomicBool,
    fail_content_writes: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every notification insert fail from now on.
    pub fn fail_notification_inserts(&self) {
        self.fail_notification_inserts.store(true, Ordering::SeqCst);
    }

    /// Make every content status write fail from now on.
    pub fn fail_content_writes(&self) {
        self.fail_content_writes.store(true, Ordering::SeqCst);
    }

    /// Seed an advertiser directly.
    pub fn seed_advertiser(
        &self,
        user_id: OperatorId,
        name: &str,
        contact_phone: Option<&str>,
    ) -> Advertiser {
        let now = Utc::now();
        let advertiser = Advertiser {
            id: AdvertiserId::new(),
            user_id,
            name: name.to_string(),
            contact_name: None,
            contact_phone: contact_phone.map(str::to_string),
            contact_email: None,
            memo: None,
            created_at: now,
            updated_at: now,
        };
        self.advertisers.lock().unwrap().push(advertiser.clone());
        advertiser
    }

    /// Seed a content row in an arbitrary status.
    pub fn seed_content(
        &self,
        advertiser: &Advertiser,
        title: &str,
        status: ContentStatus,
        preview_token: PreviewToken,
    ) -> Content {
        let now = Utc::now();
        let content = Content {
            id: ContentId::new(),
            user_id: advertiser.user_id,
            advertiser_id: advertiser.id,
            title: title.to_string(),
            body: String::new(),
            channel: crate::domains::contents::models::Channel::Instagram,
            status,
            scheduled_at: None,
            preview_token,
            confirm_requested_at: None,
            confirm_responded_at: None,
            confirm_message: None,
            metadata: serde_json::json!({}),
            created_at: now,
            updated_at: now,
        };
        self.contents.lock().unwrap().push(content.clone());
        content
    }

    /// Current row, ignoring ownership.
    pub fn content(&self, id: ContentId) -> Option<Content> {
        self.contents
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    fn check_content_writes(&self) -> Result<()> {
        if self.fail_content_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("simulated content write failure"));
        }
        Ok(())
    }

    fn update_content<F>(&self, id: ContentId, f: F) -> Option<Content>
    where
        F: FnOnce(&mut Content) -> bool,
    {
        let mut contents = self.contents.lock().unwrap();
        let content = contents.iter_mut().find(|c| c.id == id)?;
        if !f(content) {
            return None;
        }
        content.updated_at = Utc::now();
        Some(content.clone())
    }
}

#[async_trait]
impl BaseAdvertiserStore for InMemoryStore {
    async fn create_advertiser(
        &self,
        user_id: OperatorId,
        input: &NewAdvertiser,
    ) -> Result<Advertiser> {
        let now = Utc::now();
        let advertiser = Advertiser {
            id: AdvertiserId::new(),
            user_id,
            name: input.name.clone(),
            contact_name: input.contact_name.clone(),
            contact_phone: input.contact_phone.clone(),
            contact_email: input.contact_email.clone(),
            memo: input.memo.clone(),
            created_at: now,
            updated_at: now,
        };
        self.advertisers.lock().unwrap().push(advertiser.clone());
        Ok(advertiser)
    }

    async fn find_advertiser(
        &self,
        id: AdvertiserId,
        user_id: OperatorId,
    ) -> Result<Option<Advertiser>> {
        Ok(self
            .advertisers
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id && a.user_id == user_id)
            .cloned())
    }

    async fn list_advertisers(&self, user_id: OperatorId) -> Result<Vec<Advertiser>> {
        let mut list: Vec<Advertiser> = self
            .advertisers
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    async fn save_advertiser(&self, advertiser: &Advertiser) -> Result<Option<Advertiser>> {
        let mut advertisers = self.advertisers.lock().unwrap();
        let Some(existing) = advertisers
            .iter_mut()
            .find(|a| a.id == advertiser.id && a.user_id == advertiser.user_id)
        else {
            return Ok(None);
        };
        *existing = Advertiser {
            updated_at: Utc::now(),
            ..advertiser.clone()
        };
        Ok(Some(existing.clone()))
    }
}

#[async_trait]
impl BaseContentStore for InMemoryStore {
    async fn create_content(
        &self,
        user_id: OperatorId,
        input: &NewContent,
        preview_token: &PreviewToken,
    ) -> Result<Content> {
        let mut contents = self.contents.lock().unwrap();
        if contents.iter().any(|c| &c.preview_token == preview_token) {
            return Err(anyhow!("duplicate preview token"));
        }
        let now = Utc::now();
        let content = Content {
            id: ContentId::new(),
            user_id,
            advertiser_id: input.advertiser_id,
            title: input.title.clone(),
            body: input.body.clone(),
            channel: input.channel,
            status: ContentStatus::Draft,
            scheduled_at: input.scheduled_at,
            preview_token: preview_token.clone(),
            confirm_requested_at: None,
            confirm_responded_at: None,
            confirm_message: None,
            metadata: input.metadata.clone(),
            created_at: now,
            updated_at: now,
        };
        contents.push(content.clone());
        Ok(content)
    }

    async fn find_content(&self, id: ContentId, user_id: OperatorId) -> Result<Option<Content>> {
        Ok(self.content(id).filter(|c| c.user_id == user_id))
    }

    async fn list_contents(
        &self,
        user_id: OperatorId,
        filter: &ContentFilter,
    ) -> Result<Vec<Content>> {
        let mut list: Vec<Content> = self
            .contents
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == user_id && filter.matches(c))
            .cloned()
            .collect();
        list.sort_by_key(|c| (c.scheduled_at.is_none(), c.scheduled_at, c.created_at));
        Ok(list)
    }

    async fn save_draft(&self, content: &Content) -> Result<Option<Content>> {
        self.check_content_writes()?;
        Ok(self.update_content(content.id, |existing| {
            if existing.user_id != content.user_id || !existing.status.is_editable() {
                return false;
            }
            existing.title = content.title.clone();
            existing.body = content.body.clone();
            existing.channel = content.channel;
            existing.scheduled_at = content.scheduled_at;
            existing.status = content.status;
            true
        }))
    }

    async fn mark_confirm_requested(
        &self,
        id: ContentId,
        user_id: OperatorId,
        requested_at: DateTime<Utc>,
    ) -> Result<Option<Content>> {
        self.check_content_writes()?;
        Ok(self.update_content(id, |existing| {
            if existing.user_id != user_id || !existing.status.can_request_confirm() {
                return false;
            }
            existing.status = ContentStatus::PendingConfirm;
            existing.confirm_requested_at = Some(requested_at);
            true
        }))
    }

    async fn mark_published(
        &self,
        id: ContentId,
        user_id: OperatorId,
        metadata: &serde_json::Value,
    ) -> Result<Option<Content>> {
        self.check_content_writes()?;
        Ok(self.update_content(id, |existing| {
            if existing.user_id != user_id || existing.status != ContentStatus::Approved {
                return false;
            }
            existing.status = ContentStatus::Published;
            existing.metadata = metadata.clone();
            true
        }))
    }

    async fn delete_content(&self, id: ContentId, user_id: OperatorId) -> Result<bool> {
        let mut contents = self.contents.lock().unwrap();
        let before = contents.len();
        contents.retain(|c| !(c.id == id && c.user_id == user_id));
        Ok(contents.len() < before)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl BaseNotificationStore for InMemoryStore {
    async fn insert_notification(&self, input: &NewNotification) -> Result<Notification> {
        if self.fail_notification_inserts.load(Ordering::SeqCst) {
            return Err(anyhow!("simulated notification insert failure"));
        }
        let notification = Notification {
            id: NotificationId::new(),
            user_id: input.user_id,
            content_id: input.content_id,
            notification_type: input.notification_type,
            message: input.message.clone(),
            recipient_phone: input.recipient_phone.clone(),
            recipient_email: input.recipient_email.clone(),
            status: input.status,
            sent_at: input.sent_at,
            is_read: false,
            created_at: Utc::now(),
        };
        self.notifications.lock().unwrap().push(notification.clone());
        Ok(notification)
    }

    async fn list_notifications(
        &self,
        user_id: OperatorId,
        unread_only: bool,
    ) -> Result<Vec<Notification>> {
        Ok(self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|n| n.user_id == user_id && (!unread_only || !n.is_read))
            .cloned()
            .collect())
    }

    async fn mark_notification_read(
        &self,
        id: NotificationId,
        user_id: OperatorId,
    ) -> Result<bool> {
        let mut notifications = self.notifications.lock().unwrap();
        match notifications
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
        {
            Some(notification) => {
                notification.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl BasePreviewStore for InMemoryStore {
    async fn find_by_preview_token(&self, token: &PreviewToken) -> Result<Option<Content>> {
        Ok(self
            .contents
            .lock()
            .unwrap()
            .iter()
            .find(|c| &c.preview_token == token)
            .cloned())
    }

    async fn record_confirm_response(
        &self,
        id: ContentId,
        status: ContentStatus,
        message: Option<&str>,
        responded_at: DateTime<Utc>,
    ) -> Result<Option<Content>> {
        self.check_content_writes()?;
        Ok(self.update_content(id, |existing| {
            if existing.status != ContentStatus::PendingConfirm {
                return false;
            }
            existing.status = status;
            existing.confirm_responded_at = Some(responded_at);
            existing.confirm_message = message.map(str::to_string);
            true
        }))
    }
}

// =============================================================================
// Mock AI (Generic LLM capabilities)
// =============================================================================

#[derive(Default)]
pub struct MockAI {
    responses: Mutex<Vec<String>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockAI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response; responses are returned in order.
    pub fn with_response(self, response: &str) -> Self {
        self.responses.lock().unwrap().push(response.to_string());
        self
    }

    /// (system prompt, user prompt) pairs received so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.complete_with_system("", prompt).await
    }

    async fn complete_with_system(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(anyhow!("MockAI has no queued response"));
        }
        Ok(responses.remove(0))
    }
}

// =============================================================================
// Spy Messenger
// =============================================================================

#[derive(Default)]
pub struct SpyMessenger {
    sent: Mutex<Vec<(String, String)>>,
    fail: AtomicBool,
}

impl SpyMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let messenger = Self::default();
        messenger.fail.store(true, Ordering::SeqCst);
        messenger
    }

    /// (phone, message) pairs handed to the messenger.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseMessenger for SpyMessenger {
    async fn send_confirm_request(&self, phone_number: &str, message: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((phone_number.to_string(), message.to_string()));
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("simulated messenger failure"));
        }
        Ok(())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Bundle of test doubles that share one in-memory store.
pub struct TestDependencies {
    pub store: Arc<InMemoryStore>,
    pub ai: Arc<MockAI>,
    pub messenger: Arc<SpyMessenger>,
    pub jwt_service: Arc<JwtService>,
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryStore::new()),
            ai: Arc::new(MockAI::new()),
            messenger: Arc::new(SpyMessenger::new()),
            jwt_service: Arc::new(JwtService::new(TEST_JWT_SECRET, TEST_JWT_ISSUER.to_string())),
        }
    }

    pub fn with_ai(mut self, ai: MockAI) -> Self {
        self.ai = Arc::new(ai);
        self
    }

    pub fn with_messenger(mut self, messenger: SpyMessenger) -> Self {
        self.messenger = Arc::new(messenger);
        self
    }

    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps {
            advertisers: self.store.clone(),
            contents: self.store.clone(),
            notifications: self.store.clone(),
            preview: self.store.clone(),
            ai: self.ai.clone(),
            messenger: self.messenger.clone(),
            jwt_service: self.jwt_service.clone(),
            preview_base_url: TEST_PREVIEW_BASE_URL.to_string(),
        }
    }

    /// Bearer token for the given operator.
    pub fn token_for(&self, operator_id: OperatorId) -> String {
        self.jwt_service
            .create_token(operator_id, "operator@example.com".to_string())
            .expect("test token")
    }
}
