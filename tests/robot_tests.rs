//! Tests for the Robot command interface
//!
//! These tests verify:
//! - Bytes written for each command
//! - Decoding of each sensor reply
//! - Contract violations never reach the wire
//! - Round-trip failures tear the link down

mod common;

use common::{identified, opened, ScriptedPort};
use zumolink::protocol::{Command, Direction, Proximity, Response, Vector3};
use zumolink::transport::StreamTransport;
use zumolink::{Connection, ErrorKind, LinkStatus};

// =============================================================================
// Access Tests
// =============================================================================

#[test]
fn test_robot_requires_identified() {
    let (mut conn, probe) = opened(b"Zumo32U4\n");

    let err = conn.robot().err().unwrap();

    assert_eq!(err.kind(), ErrorKind::ContractViolation);
    assert!(probe.written().is_empty());
}

#[test]
fn test_robot_unavailable_after_failure() {
    let (mut conn, probe) = opened(b"NotARobot\n");
    conn.identify().unwrap_err();
    probe.clear();

    assert_eq!(conn.robot().err().unwrap().kind(), ErrorKind::ContractViolation);
    assert!(probe.written().is_empty());
}

#[test]
fn test_robot_identity() {
    let (mut conn, _probe) = identified(b"");
    let robot = conn.robot().unwrap();
    assert_eq!(robot.identity(), "Zumo32U4");
}

// =============================================================================
// Write-only Command Tests
// =============================================================================

#[test]
fn test_drive_commands() {
    let (mut conn, probe) = identified(b"");
    let mut robot = conn.robot().unwrap();

    robot.forward(2).unwrap();
    robot.backward(9).unwrap();
    robot.turn_left(0).unwrap();
    robot.turn_right(5).unwrap();
    robot.stop().unwrap();

    assert_eq!(probe.written(), b"F2B9L0R5F0");
}

#[test]
fn test_set_speeds() {
    let (mut conn, probe) = identified(b"");
    let mut robot = conn.robot().unwrap();

    robot.set_speeds(300, -300).unwrap();

    assert_eq!(probe.written(), &[b'S', b'S', 0x01, 0x2C, 0xFE, 0xD4]);
}

#[test]
fn test_buzzer_and_leds() {
    let (mut conn, probe) = identified(b"");
    let mut robot = conn.robot().unwrap();

    robot.buzz(1).unwrap();
    robot.led_yellow(1).unwrap();
    robot.led_green(0).unwrap();

    assert_eq!(probe.written(), b"N1Y1Z0");
}

#[test]
fn test_out_of_range_speed_writes_nothing() {
    let (mut conn, probe) = identified(b"");
    let mut robot = conn.robot().unwrap();

    assert_eq!(robot.forward(10).unwrap_err().kind(), ErrorKind::ContractViolation);
    assert_eq!(robot.buzz(12).unwrap_err().kind(), ErrorKind::ContractViolation);
    assert_eq!(robot.led_green(200).unwrap_err().kind(), ErrorKind::ContractViolation);

    assert!(probe.written().is_empty());
    assert_eq!(conn.status(), LinkStatus::Identified);
}

#[test]
fn test_invalid_selector_writes_nothing() {
    let (mut conn, probe) = identified(b"");
    let mut robot = conn.robot().unwrap();

    assert_eq!(robot.encoder('F').unwrap_err().kind(), ErrorKind::ContractViolation);
    assert_eq!(robot.proximity('Q').unwrap_err().kind(), ErrorKind::ContractViolation);

    assert!(probe.written().is_empty());
}

// =============================================================================
// Query Tests
// =============================================================================

#[test]
fn test_battery() {
    let (mut conn, probe) = identified(&[0x00, 0x64, 0xFF, 0x9C]);
    let mut robot = conn.robot().unwrap();

    assert_eq!(robot.battery().unwrap(), 100);
    assert_eq!(robot.battery().unwrap(), -100);
    assert_eq!(probe.written(), b"BABA");
}

#[test]
fn test_encoders() {
    let (mut conn, probe) = identified(&[0x01, 0x00, 0xFF, 0xFF]);
    let mut robot = conn.robot().unwrap();

    assert_eq!(robot.encoders().unwrap(), (256, -1));
    assert_eq!(probe.written(), b"ELER");
}

#[test]
fn test_gyro() {
    let (mut conn, probe) = identified(&[0x00, 0x01, 0x00, 0x02, 0x00, 0x03]);
    let mut robot = conn.robot().unwrap();

    assert_eq!(robot.gyro().unwrap(), Vector3 { x: 1, y: 2, z: 3 });
    assert_eq!(probe.written(), b"GY");
}

#[test]
fn test_compass() {
    let (mut conn, probe) = identified(&[
        0xFF, 0xFF, 0x00, 0x00, 0x7F, 0xFF, // magnetic
        0x80, 0x00, 0x00, 0x10, 0x00, 0x20, // acceleration
    ]);
    let mut robot = conn.robot().unwrap();

    assert_eq!(
        robot.compass_magnetic().unwrap(),
        Vector3 { x: -1, y: 0, z: i16::MAX }
    );
    assert_eq!(
        robot.compass_acceleration().unwrap(),
        Vector3 { x: i16::MIN, y: 16, z: 32 }
    );
    assert_eq!(probe.written(), b"CMCA");
}

#[test]
fn test_front_proximity_pair_in_read_order() {
    let (mut conn, probe) = identified(&[0x05, 0x0A]);
    let mut robot = conn.robot().unwrap();

    assert_eq!(
        robot.proximity('F').unwrap(),
        Proximity::Front { left: 5, right: 10 }
    );
    assert_eq!(probe.written(), b"PF");
}

#[test]
fn test_side_proximity() {
    let (mut conn, _probe) = identified(&[0x03, 0x04]);
    let mut robot = conn.robot().unwrap();

    assert_eq!(robot.proximity('L').unwrap(), Proximity::Side(3));
    assert_eq!(robot.proximity('R').unwrap(), Proximity::Side(4));
}

#[test]
fn test_execute_generic() {
    let (mut conn, _probe) = identified(&[0x0F, 0xA0]);
    let mut robot = conn.robot().unwrap();

    assert_eq!(robot.execute(&Command::stop()).unwrap(), None);
    assert_eq!(
        robot.execute(&Command::ReadBattery).unwrap(),
        Some(Response::Int16(4000))
    );
}

#[test]
fn test_snapshot() {
    let replies = [
        0x00, 0x0A, // encoder L
        0x00, 0x0B, // encoder R
        0x01, // proximity L
        0x02, 0x03, // proximity F
        0x04, // proximity R
        0x00, 0x01, 0x00, 0x02, 0x00, 0x03, // gyro
        0x00, 0x04, 0x00, 0x05, 0x00, 0x06, // magnetic
        0x00, 0x07, 0x00, 0x08, 0x00, 0x09, // acceleration
        0x12, 0x34, // battery
    ];
    let (mut conn, probe) = identified(&replies);
    let mut robot = conn.robot().unwrap();

    let snapshot = robot.snapshot().unwrap();

    assert_eq!(snapshot.encoders, (10, 11));
    assert_eq!(snapshot.proximity_left, 1);
    assert_eq!(snapshot.proximity_front, (2, 3));
    assert_eq!(snapshot.proximity_right, 4);
    assert_eq!(snapshot.gyro, Vector3 { x: 1, y: 2, z: 3 });
    assert_eq!(snapshot.magnetic, Vector3 { x: 4, y: 5, z: 6 });
    assert_eq!(snapshot.acceleration, Vector3 { x: 7, y: 8, z: 9 });
    assert_eq!(snapshot.battery, 0x1234);
    assert_eq!(probe.written(), b"ELERPLPFPRGYCMCABA");
}

// =============================================================================
// Failure Tests
// =============================================================================

#[test]
fn test_short_read_fails_and_tears_down() {
    let (mut conn, probe) = identified(&[0x01]);

    let err = conn.robot().unwrap().encoder('L').unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Communication);
    assert_eq!(conn.status(), LinkStatus::Failed);
    assert!(probe.is_dropped());
    assert_eq!(conn.robot().err().unwrap().kind(), ErrorKind::ContractViolation);
}

#[test]
fn test_front_proximity_missing_second_byte() {
    let (mut conn, _probe) = identified(&[0x05]);

    let err = conn.robot().unwrap().proximity('F').unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Communication);
    assert_eq!(conn.status(), LinkStatus::Failed);
}

#[test]
fn test_timeout_on_gyro() {
    let (mut conn, _probe) = identified(&[]);

    let err = conn.robot().unwrap().gyro().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Communication);
    assert_eq!(conn.status(), LinkStatus::Failed);
}

#[test]
fn test_query_direction_front_maps_to_pair_shape() {
    let (port, _probe) = ScriptedPort::new(b"Zumo32U4\n\x07\x08");
    let mut conn = Connection::with_transport(common::test_config(), StreamTransport::new(port));
    conn.identify().unwrap();

    let response = conn
        .robot()
        .unwrap()
        .execute(&Command::ReadProximity(Direction::Front))
        .unwrap();

    assert_eq!(
        response,
        Some(Response::Proximity(Proximity::Front { left: 7, right: 8 }))
    );
}
