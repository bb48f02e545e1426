use picfeed_core::Confirm;
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

/// Blocking native yes/no dialog.
pub struct NativeConfirm;

impl Confirm for NativeConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        let result = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title("Picfeed")
            .set_description(prompt)
            .set_buttons(MessageButtons::YesNo)
            .show();
        matches!(result, MessageDialogResult::Yes | MessageDialogResult::Ok)
    }
}
