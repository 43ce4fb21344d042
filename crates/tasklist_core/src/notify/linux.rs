use crate::error::AppError;
use crate::notify::Notifier;
use crate::store::Notice;
use notify_rust::{Notification, Urgency};

pub struct LinuxNotifier;

impl Notifier for LinuxNotifier {
    fn notify(&self, notice: &Notice) -> Result<(), AppError> {
        let mut notification = Notification::new();
        notification.summary(notice.title);
        notification.body(notice.description);
        if notice.destructive {
            notification.urgency(Urgency::Critical);
        }

        notification
            .show()
            .map_err(|err| AppError::io(err.to_string()))?;

        Ok(())
    }
}
