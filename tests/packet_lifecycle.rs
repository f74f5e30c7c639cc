use rand::Rng;
use spraywait::packet::{
    CopyAccountingError, CopyState, Packet, PacketConfig, PacketFactory, PacketId,
    PacketIdAllocator,
};
use std::sync::Arc;

fn isolated_factory() -> PacketFactory {
    PacketFactory::with_allocator(Arc::new(PacketIdAllocator::new()), PacketConfig::default())
}

/// Walk one packet from creation to discard
#[test]
fn test_spray_and_wait_lifecycle() {
    let factory = isolated_factory();
    let mut p = factory.create(7);

    assert_eq!(p.parent_id(), 7);
    assert_eq!(p.copies(), 8);
    assert!(p.exists());
    assert!(p.deliverable());

    p.decrease_copies(6).unwrap();
    assert_eq!(p.copies(), 2);
    assert!(p.deliverable());

    p.decrease_copies(1).unwrap();
    assert_eq!(p.copies(), 1);
    assert!(!p.deliverable());
    assert!(p.exists());

    p.zero();
    assert_eq!(p.copies(), 0);
    assert!(!p.exists());
    assert_eq!(p.state(), CopyState::Exhausted);
}

#[test]
fn test_boundary_failures_leave_budget_unchanged() {
    let factory = isolated_factory();
    let mut p = factory.create(1);

    p.set_copies(5).unwrap();
    assert!(matches!(
        p.decrease_copies(5),
        Err(CopyAccountingError::Decrease { .. })
    ));
    assert_eq!(p.copies(), 5);

    assert!(p.set_copies(0).is_err());
    assert!(p.set_copies(-1).is_err());
    assert_eq!(p.copies(), 5);

    p.set_copies(4).unwrap();
    assert_eq!(p.copies(), 4);
}

#[test]
fn test_zeroed_packet_can_be_revived() {
    let factory = isolated_factory();
    let mut p = factory.create(2);

    p.zero();
    assert!(!p.exists());

    p.set_copies(3).unwrap();
    assert!(p.exists());
    assert_eq!(p.copies(), 3);
    assert_eq!(p.state(), CopyState::Active);
}

#[test]
fn test_configured_budget_applies_uniformly() {
    let config = PacketConfig::from_json(r#"{"num-copies": 16}"#).unwrap();
    let factory = PacketFactory::with_allocator(Arc::new(PacketIdAllocator::new()), config);

    let packets: Vec<Packet> = (0..10).map(|sensor| factory.create(sensor)).collect();
    assert!(packets.iter().all(|p| p.copies() == 16));

    let ids: Vec<PacketId> = packets.iter().map(Packet::id).collect();
    let expected: Vec<PacketId> = (0..10).map(PacketId).collect();
    assert_eq!(ids, expected);
}

/// Drive a packet through random accounting requests and check every
/// outcome against a plain model of the budget.
#[test]
fn test_random_accounting_matches_model() {
    let mut rng = rand::thread_rng();
    let factory = isolated_factory();

    for _ in 0..50 {
        let mut p = factory.create(rng.gen_range(0..100));
        let mut model: i64 = 8;

        for _ in 0..200 {
            match rng.gen_range(0..10) {
                0..=5 => {
                    let n = rng.gen_range(0..10);
                    let result = p.decrease_copies(n);
                    if model > n {
                        assert!(result.is_ok());
                        model -= n;
                    } else {
                        assert!(result.is_err());
                    }
                }
                6..=8 => {
                    let n = rng.gen_range(-3..12);
                    let result = p.set_copies(n);
                    if n > 0 {
                        assert!(result.is_ok());
                        model = n;
                    } else {
                        assert!(result.is_err());
                    }
                }
                _ => {
                    p.zero();
                    model = 0;
                }
            }

            assert_eq!(i64::from(p.copies()), model);
            assert_eq!(p.exists(), model != 0);
            assert_eq!(p.deliverable(), model > 1);
        }
    }
}
