//! Pad configuration and management core tests.

use caravel_periph_core::common::constants::{GPIO_PADS, I3C_PADS, PAD_COUNT, SPI_MISO_PADS};
use caravel_periph_core::soc::management::{FirmwareState, ManagementCore};
use caravel_periph_core::soc::pads::{PadBank, PadMode, user_project_pad_setup};
use pretty_assertions::assert_eq;
use rstest::rstest;

// ══════════════════════════════════════════════════════════
// 1. Pad bank
// ══════════════════════════════════════════════════════════

#[test]
fn test_pads_power_on_as_management_inputs() {
    let pads = PadBank::new();
    for pad in 0..PAD_COUNT {
        assert_eq!(pads.mode(pad), Some(PadMode::MgmtStdInputNopull));
    }
    assert_eq!(pads.mode(PAD_COUNT), None);
}

#[test]
fn test_out_of_range_configure_ignored() {
    let mut pads = PadBank::new();
    pads.configure(PAD_COUNT + 2, PadMode::UserStdOutput);
    assert_eq!(pads.mode(PAD_COUNT + 2), None);
}

#[rstest]
#[case(PadMode::MgmtStdInputNopull, false, false, true)]
#[case(PadMode::MgmtStdOutput, false, true, false)]
#[case(PadMode::UserStdInputNopull, true, false, true)]
#[case(PadMode::UserStdInputPullup, true, false, true)]
#[case(PadMode::UserStdOutput, true, true, false)]
#[case(PadMode::UserStdBidirectional, true, true, true)]
fn test_pad_mode_capabilities(
    #[case] mode: PadMode,
    #[case] user: bool,
    #[case] drive: bool,
    #[case] sense: bool,
) {
    assert_eq!(mode.is_user(), user);
    assert_eq!(mode.can_drive(), drive);
    assert_eq!(mode.can_sense(), sense);
}

#[test]
fn test_sensed_level_respects_mode() {
    let mut pads = PadBank::new();
    pads.configure(10, PadMode::UserStdOutput);
    pads.drive_external(10, true);
    pads.drive_external(11, true);
    assert!(!pads.sensed_level(10));
    assert!(pads.sensed_level(11));

    pads.drive_external(11, false);
    assert!(!pads.sensed_level(11));
}

#[test]
fn test_user_project_pad_setup() {
    let mut pads = PadBank::new();
    user_project_pad_setup(&mut pads);

    for pad in 8..=23 {
        let expected = if SPI_MISO_PADS.contains(&pad) {
            PadMode::UserStdInputNopull
        } else {
            PadMode::UserStdOutput
        };
        assert_eq!(pads.mode(pad), Some(expected), "pad {pad}");
    }
    for pad in I3C_PADS.into_iter().chain(GPIO_PADS) {
        assert_eq!(pads.mode(pad), Some(PadMode::UserStdBidirectional));
    }
    assert_eq!(pads.mode(7), Some(PadMode::MgmtStdInputNopull));
    assert_eq!(pads.mode(28), Some(PadMode::MgmtStdInputNopull));

    pads.reset();
    assert_eq!(pads.mode(26), Some(PadMode::MgmtStdInputNopull));
}

// ══════════════════════════════════════════════════════════
// 2. Management core
// ══════════════════════════════════════════════════════════

#[test]
fn test_firmware_boot_sequence() {
    let mut pads = PadBank::new();
    let mut mgmt = ManagementCore::new(3);
    assert_eq!(mgmt.state(), FirmwareState::Reset);

    mgmt.tick(&mut pads);
    assert_eq!(mgmt.state(), FirmwareState::Reset, "no progress in reset");

    mgmt.release_reset();
    assert_eq!(mgmt.state(), FirmwareState::Booting { remaining: 3 });
    mgmt.tick(&mut pads);
    mgmt.tick(&mut pads);
    assert!(!mgmt.mgmt_gpio());
    assert!(!mgmt.user_power());

    mgmt.tick(&mut pads);
    assert_eq!(mgmt.state(), FirmwareState::Idle);
    assert!(mgmt.mgmt_gpio());
    assert!(mgmt.user_power());
    assert_eq!(pads.mode(24), Some(PadMode::UserStdBidirectional));
}

#[test]
fn test_hold_reset_drops_signals() {
    let mut pads = PadBank::new();
    let mut mgmt = ManagementCore::new(1);
    mgmt.release_reset();
    mgmt.tick(&mut pads);
    assert!(mgmt.mgmt_gpio());

    mgmt.hold_reset();
    assert_eq!(mgmt.state(), FirmwareState::Reset);
    assert!(!mgmt.mgmt_gpio());
    assert!(!mgmt.user_power());
}

#[test]
fn test_release_while_running_is_ignored() {
    let mut pads = PadBank::new();
    let mut mgmt = ManagementCore::new(1);
    mgmt.release_reset();
    mgmt.tick(&mut pads);
    mgmt.release_reset();
    assert_eq!(mgmt.state(), FirmwareState::Idle);
}
