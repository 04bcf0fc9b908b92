use boxoffice_core::{
    BookingCommand, BookingError, BookingProcessor, Seat, SeatStatus, Session, UndoMode, User,
};
use chrono::{TimeZone, Utc};

struct Fixture {
    session: Session,
    processor: BookingProcessor,
    user1: User,
    user2: User,
}

fn fixture() -> Fixture {
    let mut session = Session::new("S_test", Utc.with_ymd_and_hms(2026, 1, 1, 2, 0, 0).unwrap());
    for number in 1..=5 {
        session
            .add_seat(Seat::new(format!("A{}", number), 1, number))
            .unwrap();
    }

    Fixture {
        session,
        processor: BookingProcessor::new(),
        user1: User::new("User1", "Matvey"),
        user2: User::new("User2", "Tolya"),
    }
}

fn assert_seat(session: &Session, seat_id: &str, status: SeatStatus, holder: Option<&User>) {
    let seat = session.get_seat(seat_id).unwrap();
    assert_eq!(seat.status(), status, "status of {}", seat_id);
    assert_eq!(seat.current_user(), holder, "holder of {}", seat_id);
}

#[test]
fn test_reserve_free_seat() {
    let mut f = fixture();

    let outcome = f
        .processor
        .execute_command(BookingCommand::Reserve, &mut f.session, "A1", &f.user1);

    assert!(outcome.success);
    assert_seat(&f.session, "A1", SeatStatus::Reserved, Some(&f.user1));
}

#[test]
fn test_reserve_taken_seat_fails() {
    let mut f = fixture();
    f.processor
        .execute_command(BookingCommand::Reserve, &mut f.session, "A1", &f.user1);

    let outcome = f
        .processor
        .execute_command(BookingCommand::Reserve, &mut f.session, "A1", &f.user2);

    assert!(!outcome.success);
    assert_seat(&f.session, "A1", SeatStatus::Reserved, Some(&f.user1));
    assert_eq!(f.processor.history().len(), 1);
}

#[test]
fn test_purchase_without_reservation_fails() {
    let mut f = fixture();

    let outcome = f
        .processor
        .execute_command(BookingCommand::Purchase, &mut f.session, "A2", &f.user2);

    assert!(!outcome.success);
    assert_seat(&f.session, "A2", SeatStatus::Free, None);
}

#[test]
fn test_reserve_then_purchase() {
    let mut f = fixture();
    f.processor
        .execute_command(BookingCommand::Reserve, &mut f.session, "A2", &f.user2);

    let outcome = f
        .processor
        .execute_command(BookingCommand::Purchase, &mut f.session, "A2", &f.user2);

    assert!(outcome.success);
    assert_eq!(outcome.message, "Tolya purchased a ticket for seat A2");
    assert_seat(&f.session, "A2", SeatStatus::Sold, Some(&f.user2));
}

#[test]
fn test_purchase_by_non_holder_fails() {
    let mut f = fixture();
    f.processor
        .execute_command(BookingCommand::Reserve, &mut f.session, "A1", &f.user2);

    let outcome = f
        .processor
        .execute_command(BookingCommand::Purchase, &mut f.session, "A1", &f.user1);

    assert!(!outcome.success);
    assert_seat(&f.session, "A1", SeatStatus::Reserved, Some(&f.user2));
}

#[test]
fn test_reserve_then_cancel() {
    let mut f = fixture();
    f.processor
        .execute_command(BookingCommand::Reserve, &mut f.session, "A4", &f.user2);

    let outcome = f
        .processor
        .execute_command(BookingCommand::Cancel, &mut f.session, "A4", &f.user2);

    assert!(outcome.success);
    assert_seat(&f.session, "A4", SeatStatus::Free, None);
}

#[test]
fn test_undo_pops_latest_successful_command() {
    let mut f = fixture();
    f.processor
        .execute_command(BookingCommand::Reserve, &mut f.session, "A1", &f.user1);
    f.processor
        .execute_command(BookingCommand::Reserve, &mut f.session, "A2", &f.user2);
    f.processor
        .execute_command(BookingCommand::Purchase, &mut f.session, "A1", &f.user2);

    let outcome = f.processor.undo_last(&mut f.session).unwrap();

    assert_eq!(outcome.command, BookingCommand::Reserve);
    assert_eq!(outcome.seat_id, "A2");
    assert_eq!(f.processor.history().len(), 1);
    assert_eq!(f.processor.history()[0].seat_id, "A1");
}

#[test]
fn test_demo_sequence_final_state() {
    let mut f = fixture();
    let (u1, u2) = (f.user1.clone(), f.user2.clone());
    let steps = [
        (BookingCommand::Reserve, "A1", &u1, true),
        (BookingCommand::Reserve, "A1", &u2, false),
        (BookingCommand::Reserve, "A2", &u2, true),
        (BookingCommand::Purchase, "A2", &u2, true),
        (BookingCommand::Purchase, "A1", &u2, false),
        (BookingCommand::Purchase, "A1", &u1, true),
        (BookingCommand::Cancel, "A3", &u1, false),
        (BookingCommand::Reserve, "A4", &u2, true),
        (BookingCommand::Cancel, "A4", &u2, true),
    ];

    for (command, seat_id, user, expected) in steps {
        let outcome = f
            .processor
            .execute_command(command, &mut f.session, seat_id, user);
        assert_eq!(outcome.success, expected, "{} {} by {}", command, seat_id, user);
    }

    assert_seat(&f.session, "A1", SeatStatus::Sold, Some(&u1));
    assert_seat(&f.session, "A2", SeatStatus::Sold, Some(&u2));
    assert_seat(&f.session, "A3", SeatStatus::Free, None);
    assert_seat(&f.session, "A4", SeatStatus::Free, None);
    assert_seat(&f.session, "A5", SeatStatus::Free, None);
    assert_eq!(f.processor.history().len(), 6);
}

#[test]
fn test_restore_mode_unwinds_whole_run() {
    let mut f = fixture();
    let mut processor = BookingProcessor::new().with_undo_mode(UndoMode::Restore);
    let before = f.session.snapshot();

    processor.execute_command(BookingCommand::Reserve, &mut f.session, "A1", &f.user1);
    processor.execute_command(BookingCommand::Purchase, &mut f.session, "A1", &f.user1);
    processor.execute_command(BookingCommand::Reserve, &mut f.session, "A4", &f.user2);
    processor.execute_command(BookingCommand::Cancel, &mut f.session, "A4", &f.user2);

    while processor.undo_last(&mut f.session).is_ok() {}

    assert_eq!(f.session.snapshot(), before);
    assert_eq!(
        processor.undo_last(&mut f.session),
        Err(BookingError::EmptyHistory)
    );
}
