//! One create-menu-item workflow instance.
//!
//! [`CreateMenu`] composes the validator, the preview slot, and the
//! confirmation controller around a single [`MenuDraft`]. A host creates
//! a fresh instance each time it opens the primary dialog and drops it
//! once the instance reaches a terminal state.
//!
//! File selection is split in two so the async read can happen outside
//! any borrow of the workflow:
//!
//! ```rust
//! # use menu_draft::{CreateMenu, FileInfo, SelectedFile, Selection, SubmitGate, UploadPolicy};
//! # fn run() -> Option<()> {
//! let mut wf = CreateMenu::new(UploadPolicy::default(), SubmitGate::default(), |_| {});
//! let file = SelectedFile::new(FileInfo::new("a.png", "image/png", 3), vec![1, 2, 3]);
//! let Selection::Accepted { ticket, file } = wf.select_file(file) else {
//!     return None;
//! };
//! let result = futures::executor::block_on(menu_draft::encode(file));
//! wf.finish_encode(ticket, result);
//! assert!(wf.draft().has_image());
//! # Some(())
//! # }
//! # run();
//! ```

use std::fmt;
use std::rc::Rc;

use crate::confirm::{ConfirmationController, DialogEvent, DialogState, Ending, Transition};
use crate::preview::{Completion, EncodeTicket, PreviewSlot};
use crate::types::{EncodeError, MenuDraft, Preview, SelectedFile, UploadPolicy};
use crate::validate::{AcceptedFile, accept};

/// Warning shown when the newest preview could not be produced.
pub const ENCODE_FAILED_WARNING: &str = "Could not read the image, please try again.";

/// Decides whether `submit` may open the confirmation dialog.
///
/// The default accepts every draft. Hosts that want field checks supply
/// their own predicate or use [`SubmitGate::require_complete`].
#[derive(Clone)]
pub struct SubmitGate(Rc<dyn Fn(&MenuDraft) -> bool>);

impl SubmitGate {
    /// Gate with a custom predicate.
    pub fn new(predicate: impl Fn(&MenuDraft) -> bool + 'static) -> Self {
        Self(Rc::new(predicate))
    }

    /// Require a non-blank name and a finite, non-negative price.
    #[must_use]
    pub fn require_complete() -> Self {
        Self::new(|draft| {
            !draft.name.trim().is_empty() && draft.price.is_some_and(|p| p >= 0.0)
        })
    }

    /// Evaluate the gate.
    #[must_use]
    pub fn allows(&self, draft: &MenuDraft) -> bool {
        (self.0)(draft)
    }
}

impl Default for SubmitGate {
    fn default() -> Self {
        Self::new(|_| true)
    }
}

impl PartialEq for SubmitGate {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SubmitGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SubmitGate(..)")
    }
}

/// Result of [`CreateMenu::select_file`].
#[derive(Debug)]
#[must_use = "an accepted file must be encoded and passed to finish_encode"]
pub enum Selection<S> {
    /// Passed validation; encode `file` and report back with `ticket`.
    Accepted {
        /// Identifies this request to the preview slot.
        ticket: EncodeTicket,
        /// The file to encode.
        file: AcceptedFile<S>,
    },
    /// Failed validation; the draft is unchanged.
    Rejected {
        /// One message per failing rule.
        warnings: Vec<String>,
    },
    /// The workflow has already ended.
    Closed,
}

/// A single create-menu-item workflow instance.
#[derive(Debug)]
pub struct CreateMenu {
    draft: MenuDraft,
    slot: PreviewSlot,
    controller: ConfirmationController,
    policy: UploadPolicy,
    gate: SubmitGate,
    warnings: Vec<String>,
}

impl CreateMenu {
    /// Open a new instance in [`DialogState::Editing`].
    ///
    /// `on_complete` runs exactly once, when the instance commits or is
    /// closed from outside.
    pub fn new(
        policy: UploadPolicy,
        gate: SubmitGate,
        on_complete: impl FnOnce(Ending) + 'static,
    ) -> Self {
        Self {
            draft: MenuDraft::default(),
            slot: PreviewSlot::default(),
            controller: ConfirmationController::new(on_complete),
            policy,
            gate,
            warnings: Vec::new(),
        }
    }

    /// The draft being edited.
    #[must_use]
    pub const fn draft(&self) -> &MenuDraft {
        &self.draft
    }

    /// Current dialog state.
    #[must_use]
    pub const fn state(&self) -> DialogState {
        self.controller.state()
    }

    /// The upload limits in force.
    #[must_use]
    pub const fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Warnings from the most recent file selection or encode.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Whether the newest preview is still being encoded.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.slot.is_loading()
    }

    /// Update the product name. Ignored once the instance has ended.
    pub fn set_name(&mut self, name: impl Into<String>) {
        if !self.state().is_terminal() {
            self.draft.set_name(name);
        }
    }

    /// Update the price text. Ignored once the instance has ended.
    pub fn set_price_text(&mut self, text: impl Into<String>) {
        if !self.state().is_terminal() {
            self.draft.set_price_text(text);
        }
    }

    /// Validate a newly selected file.
    ///
    /// A rejected file leaves the draft and any in-flight encode alone.
    /// An accepted file supersedes every earlier request and clears the
    /// draft's image until its own preview lands.
    pub fn select_file<S>(&mut self, file: SelectedFile<S>) -> Selection<S> {
        if self.state().is_terminal() {
            return Selection::Closed;
        }
        match accept(file, &self.policy) {
            Ok(file) => {
                self.warnings.clear();
                self.draft.preview = None;
                let ticket = self.slot.begin();
                tracing::debug!(name = %file.info().name, generation = ticket.generation(), "encoding preview");
                Selection::Accepted { ticket, file }
            }
            Err(rejection) => {
                self.warnings = rejection.warnings();
                Selection::Rejected {
                    warnings: self.warnings.clone(),
                }
            }
        }
    }

    /// Apply the result of an encode started by [`select_file`](Self::select_file).
    pub fn finish_encode(
        &mut self,
        ticket: EncodeTicket,
        result: Result<Preview, EncodeError>,
    ) -> Completion {
        let completion = self.slot.complete(ticket, result);
        match completion {
            Completion::Applied => {
                self.draft.preview = self.slot.preview().cloned();
            }
            Completion::Failed(_) => {
                self.draft.preview = None;
                self.warnings = vec![ENCODE_FAILED_WARNING.to_owned()];
            }
            Completion::Stale => {}
        }
        completion
    }

    /// Primary action: open the confirmation dialog if the gate allows.
    pub fn submit(&mut self) -> Transition {
        let allowed = self.gate.allows(&self.draft);
        self.controller.handle_gated(DialogEvent::Submit, allowed)
    }

    /// Dismiss the confirmation dialog, back to editing.
    pub fn cancel(&mut self) -> Transition {
        self.controller.handle(DialogEvent::Cancel)
    }

    /// Accept the confirmation, handing the draft to `deliver` first.
    ///
    /// `deliver` runs only when the instance is awaiting confirmation,
    /// and always before the completion callback, so a host that tears
    /// down on completion has already received the draft.
    pub fn confirm_with(&mut self, deliver: impl FnOnce(MenuDraft)) -> Transition {
        if self.state() != DialogState::ConfirmPending {
            return self.controller.handle(DialogEvent::Confirm);
        }
        tracing::info!(
            name = %self.draft.name,
            price = ?self.draft.price,
            has_image = self.draft.has_image(),
            "menu item committed"
        );
        deliver(self.draft.clone());
        self.controller.handle(DialogEvent::Confirm)
    }

    /// Accept the confirmation.
    ///
    /// Returns the committed draft when this call committed the
    /// workflow, for the host to persist.
    pub fn confirm(&mut self) -> Option<MenuDraft> {
        let mut committed = None;
        let _ = self.confirm_with(|draft| committed = Some(draft));
        committed
    }

    /// The primary dialog was closed from outside.
    pub fn close(&mut self) -> Transition {
        self.controller.handle(DialogEvent::ExternalClose)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::cell::RefCell;

    use futures::executor::block_on;

    use super::*;
    use crate::preview::encode;
    use crate::types::FileInfo;

    fn workflow(gate: SubmitGate) -> (CreateMenu, Rc<RefCell<Vec<Ending>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let wf = CreateMenu::new(UploadPolicy::default(), gate, move |e| {
            sink.borrow_mut().push(e);
        });
        (wf, calls)
    }

    fn png(bytes: &[u8]) -> SelectedFile<Vec<u8>> {
        SelectedFile::new(
            FileInfo::new("dish.png", "image/png", bytes.len() as u64),
            bytes.to_vec(),
        )
    }

    #[test]
    fn rejected_file_leaves_preview_alone() {
        let (mut wf, _) = workflow(SubmitGate::default());
        let Selection::Accepted { ticket, file } = wf.select_file(png(b"one")) else {
            panic!("png should be accepted");
        };
        wf.finish_encode(ticket, block_on(encode(file)));
        let before = wf.draft().preview.clone();

        let gif = SelectedFile::new(FileInfo::new("anim.gif", "image/gif", 10), b"GIF".to_vec());
        let Selection::Rejected { warnings } = wf.select_file(gif) else {
            panic!("gif should be rejected");
        };
        assert_eq!(warnings, vec!["You can only upload JPG/PNG file!".to_owned()]);
        assert_eq!(wf.draft().preview, before);
        assert!(!wf.is_loading());
    }

    #[test]
    fn encode_failure_surfaces_retryable_warning() {
        let (mut wf, _) = workflow(SubmitGate::default());
        let Selection::Accepted { ticket, .. } = wf.select_file(png(b"x")) else {
            panic!("png should be accepted");
        };
        let outcome = wf.finish_encode(ticket, Err(EncodeError::Read("gone".into())));
        assert!(matches!(outcome, Completion::Failed(_)));
        assert_eq!(wf.warnings(), [ENCODE_FAILED_WARNING.to_owned()]);
        assert_eq!(wf.state(), DialogState::Editing);
    }

    #[test]
    fn default_gate_allows_empty_draft() {
        let (mut wf, _) = workflow(SubmitGate::default());
        assert!(wf.submit().moved());
        assert_eq!(wf.state(), DialogState::ConfirmPending);
    }

    #[test]
    fn complete_gate_requires_name_and_price() {
        let (mut wf, _) = workflow(SubmitGate::require_complete());
        assert_eq!(wf.submit(), Transition::Blocked);
        wf.set_name("Pad Thai");
        assert_eq!(wf.submit(), Transition::Blocked);
        wf.set_price_text("-1");
        assert_eq!(wf.submit(), Transition::Blocked);
        wf.set_price_text("60");
        assert!(wf.submit().moved());
    }

    #[test]
    fn confirm_returns_draft_and_completes_once() {
        let (mut wf, calls) = workflow(SubmitGate::default());
        wf.set_name("Tom Yum");
        wf.set_price_text("80");
        assert_eq!(wf.confirm(), None);
        wf.submit();
        let draft = wf.confirm().unwrap();
        assert_eq!(draft.name, "Tom Yum");
        assert_eq!(draft.price, Some(80.0));
        assert_eq!(wf.confirm(), None);
        assert_eq!(*calls.borrow(), vec![Ending::Committed]);
    }

    #[test]
    fn reselect_clears_draft_image_until_encoded() {
        let (mut wf, _) = workflow(SubmitGate::default());
        let Selection::Accepted { ticket, file } = wf.select_file(png(b"first")) else {
            panic!("png should be accepted");
        };
        wf.finish_encode(ticket, block_on(encode(file)));
        assert!(wf.draft().has_image());

        let Selection::Accepted { ticket, file } = wf.select_file(png(b"second")) else {
            panic!("png should be accepted");
        };
        assert!(wf.is_loading());
        assert!(!wf.draft().has_image());

        wf.finish_encode(ticket, block_on(encode(file)));
        let expected = crate::preview::data_uri("image/png", b"second");
        assert_eq!(wf.draft().preview.as_ref().map(Preview::as_str), Some(expected.as_str()));
    }

    #[test]
    fn failed_reselect_commits_without_earlier_image() {
        let (mut wf, _) = workflow(SubmitGate::default());
        let Selection::Accepted { ticket, file } = wf.select_file(png(b"first")) else {
            panic!("png should be accepted");
        };
        wf.finish_encode(ticket, block_on(encode(file)));

        let Selection::Accepted { ticket, .. } = wf.select_file(png(b"second")) else {
            panic!("png should be accepted");
        };
        wf.finish_encode(ticket, Err(EncodeError::Read("aborted".into())));

        wf.submit();
        let committed = wf.confirm().unwrap();
        assert_eq!(committed.preview, None);
    }

    #[test]
    fn submit_allowed_while_preview_loading() {
        let (mut wf, _) = workflow(SubmitGate::default());
        let Selection::Accepted { .. } = wf.select_file(png(b"slow")) else {
            panic!("png should be accepted");
        };
        assert!(wf.is_loading());
        assert!(wf.submit().moved());
        assert_eq!(wf.state(), DialogState::ConfirmPending);
    }

    #[test]
    fn draft_delivered_before_completion() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let mut wf = CreateMenu::new(UploadPolicy::default(), SubmitGate::default(), move |_| {
            sink.borrow_mut().push("complete".to_owned());
        });
        wf.set_name("Khao Soi");
        wf.submit();
        let t = wf.confirm_with(|draft| log.borrow_mut().push(format!("commit {}", draft.name)));
        assert!(t.moved());
        assert_eq!(*log.borrow(), vec!["commit Khao Soi".to_owned(), "complete".to_owned()]);
    }

    #[test]
    fn confirm_with_skips_delivery_outside_confirmation() {
        let (mut wf, calls) = workflow(SubmitGate::default());
        let mut delivered = false;
        assert_eq!(wf.confirm_with(|_| delivered = true), Transition::Ignored);
        assert!(!delivered);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn edits_ignored_after_close() {
        let (mut wf, calls) = workflow(SubmitGate::default());
        wf.close();
        wf.set_name("late");
        assert_eq!(wf.draft().name, "");
        assert!(matches!(wf.select_file(png(b"late")), Selection::Closed));
        assert_eq!(*calls.borrow(), vec![Ending::Cancelled]);
    }
}
