//! Fetch Stage Unit Tests.
//!
//! Verifies that the fetch unit correctly performs:
//!   1. Request issue: one word read per instruction, sequential addresses
//!   2. Bus handshake: stall, wait and acknowledge handling
//!   3. Output hold: the fetched word stays put until decode accepts it
//!   4. Redirects: debug > interrupt > branch > sequential, stale words dropped

use dproc_core::config::CoreConfig;
use dproc_core::core::pipeline::stages::fetch::{FetchInputs, FetchState, FetchUnit, Redirect};
use dproc_core::core::pipeline::traits::PipelineStage;
use dproc_core::soc::wishbone::BusResponse;
use pretty_assertions::assert_eq;

use crate::common::builder::instruction::InstructionBuilder;

// ══════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════

fn ready() -> FetchInputs {
    FetchInputs {
        output_ready: true,
        ..FetchInputs::default()
    }
}

fn acked(word: u32) -> FetchInputs {
    FetchInputs {
        bus: BusResponse::ack(word),
        ..ready()
    }
}

/// Fetch unit that has just issued its first request.
fn requesting() -> FetchUnit {
    let mut fetch = FetchUnit::new(&CoreConfig::default());
    let _ = fetch.tick(&ready());
    fetch
}

// ══════════════════════════════════════════════════════════
// 1. Request issue
// ══════════════════════════════════════════════════════════

#[test]
fn first_request_targets_boot_address() {
    let vectors = CoreConfig {
        boot_address: 0x200,
        ..CoreConfig::default()
    };
    let mut fetch = FetchUnit::new(&vectors);
    assert_eq!(fetch.state(), FetchState::Idle);
    assert!(!fetch.bus().cyc);

    let redirect = fetch.tick(&ready());
    assert_eq!(redirect, None);
    assert_eq!(fetch.state(), FetchState::Request);
    let bus = fetch.bus();
    assert_eq!(bus.adr, 0x200);
    assert!(bus.stb && bus.cyc && !bus.we);
    assert_eq!(bus.sel, 0xF);
}

#[test]
fn three_cycles_per_instruction() {
    let nop = InstructionBuilder::new().nop().build();
    let mut fetch = requesting();

    let _ = fetch.tick(&acked(nop));
    assert_eq!(fetch.state(), FetchState::Latched);
    assert!(fetch.bus().cyc && !fetch.bus().stb);
    assert!(!fetch.output().valid);

    let _ = fetch.tick(&ready());
    assert_eq!(fetch.state(), FetchState::Idle);
    assert!(fetch.output().valid);
    assert_eq!(fetch.output().data.pc, 0);
    assert_eq!(fetch.output().data.instr, nop);

    let _ = fetch.tick(&ready());
    assert_eq!(fetch.state(), FetchState::Request);
    assert_eq!(fetch.request_pc(), 4);
    assert!(!fetch.output().valid);
}

// ══════════════════════════════════════════════════════════
// 2. Bus handshake
// ══════════════════════════════════════════════════════════

#[test]
fn stalled_request_is_presented_again() {
    let mut fetch = requesting();
    let _ = fetch.tick(&FetchInputs {
        bus: BusResponse::BLOCKED,
        ..ready()
    });
    assert_eq!(fetch.state(), FetchState::RequestStalled);
    assert!(fetch.bus().stb);
    assert_eq!(fetch.bus().adr, 0);
}

#[test]
fn accepted_request_waits_for_ack() {
    let mut fetch = requesting();
    let _ = fetch.tick(&ready());
    assert_eq!(fetch.state(), FetchState::Wait);
    assert!(fetch.bus().cyc && !fetch.bus().stb);

    // A stall while waiting is not a stall of the request.
    let _ = fetch.tick(&FetchInputs {
        bus: BusResponse::BLOCKED,
        ..ready()
    });
    assert_eq!(fetch.state(), FetchState::Wait);

    let _ = fetch.tick(&acked(0x1234_5678));
    assert_eq!(fetch.state(), FetchState::Latched);
    let _ = fetch.tick(&ready());
    assert_eq!(fetch.output().data.instr, 0x1234_5678);
}

// ══════════════════════════════════════════════════════════
// 3. Output hold
// ══════════════════════════════════════════════════════════

#[test]
fn output_held_until_decode_accepts() {
    let mut fetch = requesting();
    let _ = fetch.tick(&acked(0x13));
    let _ = fetch.tick(&FetchInputs::default());
    assert_eq!(fetch.state(), FetchState::OutputHeld);
    assert!(fetch.output().valid);
    assert!(!fetch.bus().cyc);

    let _ = fetch.tick(&FetchInputs::default());
    assert_eq!(fetch.state(), FetchState::OutputHeld);
    assert!(fetch.output().valid);

    let _ = fetch.tick(&ready());
    assert_eq!(fetch.state(), FetchState::Idle);
    assert!(!fetch.output().valid);
}

// ══════════════════════════════════════════════════════════
// 4. Redirects
// ══════════════════════════════════════════════════════════

#[test]
fn branch_drops_word_in_flight() {
    let mut fetch = requesting();
    let _ = fetch.tick(&FetchInputs {
        branch: true,
        branch_target: 0x40,
        ..acked(0x13)
    });
    assert_eq!(fetch.state(), FetchState::Latched);

    let _ = fetch.tick(&ready());
    assert_eq!(fetch.state(), FetchState::Idle);
    assert!(!fetch.output().valid);

    let redirect = fetch.tick(&ready());
    assert_eq!(redirect, Some(Redirect::Branch));
    assert_eq!(fetch.bus().adr, 0x40);

    // Sequential again after the redirect.
    let _ = fetch.tick(&acked(0x13));
    let _ = fetch.tick(&ready());
    assert_eq!(fetch.tick(&ready()), None);
    assert_eq!(fetch.bus().adr, 0x44);
}

#[test]
fn branch_at_latch_edge_cancels_output() {
    let mut fetch = requesting();
    let _ = fetch.tick(&acked(0x13));
    let _ = fetch.tick(&FetchInputs {
        branch: true,
        branch_target: 0x80,
        ..ready()
    });
    assert!(!fetch.output().valid);
    assert_eq!(fetch.tick(&ready()), Some(Redirect::Branch));
    assert_eq!(fetch.request_pc(), 0x80);
}

#[test]
fn interrupt_wins_over_branch() {
    let mut fetch = requesting();
    let _ = fetch.tick(&FetchInputs {
        irq: true,
        branch: true,
        branch_target: 0x80,
        ..acked(0x13)
    });
    let _ = fetch.tick(&ready());
    assert_eq!(fetch.tick(&ready()), Some(Redirect::Interrupt));
    assert_eq!(fetch.request_pc(), 0x10);
}

#[test]
fn debug_wins_over_interrupt() {
    let mut fetch = requesting();
    let _ = fetch.tick(&FetchInputs {
        irq: true,
        drq: true,
        ..acked(0x13)
    });
    let _ = fetch.tick(&ready());
    assert_eq!(fetch.tick(&ready()), Some(Redirect::Debug));
    assert_eq!(fetch.request_pc(), 0x20);
}

#[test]
fn reset_returns_to_boot_address() {
    let mut fetch = requesting();
    let _ = fetch.tick(&acked(0x13));
    fetch.reset();
    assert_eq!(fetch.state(), FetchState::Idle);
    assert!(!fetch.output().valid);
    let _ = fetch.tick(&ready());
    assert_eq!(fetch.bus().adr, 0);
}

#[test]
fn state_encodings() {
    let states = [
        FetchState::Idle,
        FetchState::Request,
        FetchState::Wait,
        FetchState::Latched,
        FetchState::RequestStalled,
        FetchState::OutputHeld,
    ];
    let encoded: Vec<u8> = states.iter().map(|s| s.encoding()).collect();
    assert_eq!(encoded, vec![0, 1, 2, 3, 4, 5]);
}
