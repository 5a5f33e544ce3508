//! Integration test: drive a whole create-menu-item workflow, including
//! encodes that resolve out of order.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::executor::block_on;
use menu_draft::{
    CreateMenu, DialogState, EncodeError, Ending, FileInfo, FileSource, SelectedFile, Selection,
    SubmitGate, UploadPolicy, encode,
};

/// A file whose bytes arrive whenever the test sends them.
struct Deferred(oneshot::Receiver<Vec<u8>>);

impl FileSource for Deferred {
    fn read_all(self) -> impl Future<Output = Result<Vec<u8>, EncodeError>> {
        async move {
            self.0
                .await
                .map_err(|_| EncodeError::Read("reader dropped".into()))
        }
    }
}

fn deferred(name: &str, mime: &str, size: u64) -> (SelectedFile<Deferred>, oneshot::Sender<Vec<u8>>) {
    let (tx, rx) = oneshot::channel();
    (
        SelectedFile::new(FileInfo::new(name, mime, size), Deferred(rx)),
        tx,
    )
}

fn workflow() -> (CreateMenu, Rc<RefCell<Vec<Ending>>>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let wf = CreateMenu::new(UploadPolicy::default(), SubmitGate::default(), move |e| {
        sink.borrow_mut().push(e);
    });
    (wf, calls)
}

#[test]
fn later_selection_wins_over_later_completion() {
    let (mut wf, _) = workflow();

    let (file_a, send_a) = deferred("a.png", "image/png", 4);
    let Selection::Accepted { ticket: ticket_a, file: file_a } = wf.select_file(file_a) else {
        panic!("a.png should be accepted");
    };
    let encode_a = encode(file_a);

    let (file_b, send_b) = deferred("b.jpg", "image/jpeg", 4);
    let Selection::Accepted { ticket: ticket_b, file: file_b } = wf.select_file(file_b) else {
        panic!("b.jpg should be accepted");
    };
    let encode_b = encode(file_b);

    // B's read finishes first, then A's.
    send_b.send(b"BBBB".to_vec()).unwrap();
    let preview_b = block_on(encode_b);
    wf.finish_encode(ticket_b, preview_b);

    send_a.send(b"AAAA".to_vec()).unwrap();
    let preview_a = block_on(encode_a);
    wf.finish_encode(ticket_a, preview_a);

    let preview = wf.draft().preview.as_ref().expect("preview should be set");
    assert_eq!(preview.as_str(), "data:image/jpeg;base64,QkJCQg==");
    assert!(!wf.is_loading());
}

#[test]
fn stale_completion_before_newest_keeps_loading() {
    let (mut wf, _) = workflow();

    let (file_a, send_a) = deferred("a.png", "image/png", 4);
    let Selection::Accepted { ticket: ticket_a, file: file_a } = wf.select_file(file_a) else {
        panic!("a.png should be accepted");
    };
    let (file_b, _send_b) = deferred("b.png", "image/png", 4);
    let Selection::Accepted { .. } = wf.select_file(file_b) else {
        panic!("b.png should be accepted");
    };

    send_a.send(b"AAAA".to_vec()).unwrap();
    wf.finish_encode(ticket_a, block_on(encode(file_a)));

    assert!(wf.draft().preview.is_none());
    assert!(wf.is_loading());
}

#[test]
fn rejected_selection_does_not_supersede_in_flight_encode() {
    let (mut wf, _) = workflow();

    let (file_a, send_a) = deferred("a.png", "image/png", 4);
    let Selection::Accepted { ticket, file } = wf.select_file(file_a) else {
        panic!("a.png should be accepted");
    };

    let (too_big, _) = deferred("huge.gif", "image/gif", 3 * 1024 * 1024);
    let Selection::Rejected { warnings } = wf.select_file(too_big) else {
        panic!("huge.gif should be rejected");
    };
    assert_eq!(warnings.len(), 2);

    send_a.send(b"AAAA".to_vec()).unwrap();
    wf.finish_encode(ticket, block_on(encode(file)));
    assert!(wf.draft().has_image());
}

#[test]
fn dropped_reader_is_reported_not_applied() {
    let (mut wf, _) = workflow();
    let (file, send) = deferred("a.png", "image/png", 4);
    let Selection::Accepted { ticket, file } = wf.select_file(file) else {
        panic!("a.png should be accepted");
    };
    drop(send);
    wf.finish_encode(ticket, block_on(encode(file)));
    assert!(wf.draft().preview.is_none());
    assert_eq!(wf.warnings().len(), 1);
}

#[test]
fn superseded_image_never_reaches_committed_draft() {
    let (mut wf, _) = workflow();

    let (file_a, send_a) = deferred("a.png", "image/png", 4);
    let Selection::Accepted { ticket, file } = wf.select_file(file_a) else {
        panic!("a.png should be accepted");
    };
    send_a.send(b"AAAA".to_vec()).unwrap();
    wf.finish_encode(ticket, block_on(encode(file)));
    assert!(wf.draft().has_image());

    let (file_b, send_b) = deferred("b.png", "image/png", 4);
    let Selection::Accepted { ticket, file } = wf.select_file(file_b) else {
        panic!("b.png should be accepted");
    };
    assert!(wf.is_loading());
    assert!(wf.draft().preview.is_none(), "a.png must not stand in for b.png");

    drop(send_b);
    wf.finish_encode(ticket, block_on(encode(file)));
    assert!(wf.draft().preview.is_none());

    assert!(wf.submit().moved());
    let committed = wf.confirm().expect("confirm should commit");
    assert_eq!(committed.preview, None);
}

#[test]
fn full_round_trip_through_confirmation() {
    let (mut wf, calls) = workflow();

    let (file, send) = deferred("curry.png", "image/png", 4);
    let Selection::Accepted { ticket, file } = wf.select_file(file) else {
        panic!("curry.png should be accepted");
    };
    send.send(vec![0x89, b'P', b'N', b'G']).unwrap();
    wf.finish_encode(ticket, block_on(encode(file)));
    wf.set_name("Green curry");
    wf.set_price_text("120");

    assert!(wf.submit().moved());
    assert!(wf.cancel().moved());
    assert_eq!(wf.state(), DialogState::Editing);
    assert!(!wf.cancel().moved());
    assert!(calls.borrow().is_empty());

    assert!(wf.submit().moved());
    let committed = wf.confirm().expect("confirm should commit");
    assert_eq!(committed.name, "Green curry");
    assert_eq!(committed.price, Some(120.0));
    assert!(
        committed
            .preview
            .as_ref()
            .is_some_and(|p| p.as_str().starts_with("data:image/png;base64,"))
    );
    assert_eq!(wf.state(), DialogState::Committed);
    assert_eq!(*calls.borrow(), vec![Ending::Committed]);
}
