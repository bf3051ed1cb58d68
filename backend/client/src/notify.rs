/// Transient user notifications (the toast seam).
pub trait Notifier: Send + Sync {
    fn success(&self, title: &str, description: &str);
    fn error(&self, title: &str, description: &str);
}
