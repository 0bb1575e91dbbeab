//! Load-Store Stage Unit Tests.
//!
//! Verifies the bypass path, the bus FSM and load extension.

use dproc_core::common::data::AccessWidth;
use dproc_core::core::pipeline::latches::{ExecuteOutput, Latch};
use dproc_core::core::pipeline::stages::memory::{LoadStoreInputs, LoadStoreState, LoadStoreUnit};
use dproc_core::core::pipeline::traits::PipelineStage;
use dproc_core::soc::wishbone::BusResponse;
use pretty_assertions::assert_eq;

fn load(width: AccessWidth, unsigned: bool) -> ExecuteOutput {
    ExecuteOutput {
        pc: 0x20,
        instr: 0x0000_2083,
        result: 0x100,
        ls_enable: true,
        ls_width: width,
        ls_unsigned: unsigned,
        reg_write: true,
        reg_addr: 1,
        ..ExecuteOutput::default()
    }
}

fn issue(unit: &mut LoadStoreUnit, ex: ExecuteOutput) {
    unit.tick(&LoadStoreInputs {
        input: Latch::new(ex),
        bus: BusResponse::default(),
    });
}

fn respond(unit: &mut LoadStoreUnit, bus: BusResponse) {
    unit.tick(&LoadStoreInputs {
        input: Latch::bubble(),
        bus,
    });
}

#[test]
fn bypass_registers_execute_result() {
    let mut unit = LoadStoreUnit::new();
    issue(
        &mut unit,
        ExecuteOutput {
            result: 9,
            reg_write: true,
            reg_addr: 4,
            ..ExecuteOutput::default()
        },
    );
    assert_eq!(unit.state(), LoadStoreState::Idle);
    assert!(unit.output().valid);
    assert_eq!(unit.output().data.reg_data, 9);
    assert!(unit.pending_write().enable);
    assert_eq!(unit.pending_write().addr, 4);
}

#[test]
fn invalid_input_never_writes() {
    let mut unit = LoadStoreUnit::new();
    unit.tick(&LoadStoreInputs {
        input: Latch {
            valid: false,
            data: ExecuteOutput {
                reg_write: true,
                reg_addr: 4,
                ..ExecuteOutput::default()
            },
        },
        bus: BusResponse::default(),
    });
    assert!(!unit.output().data.reg_write);
}

#[test]
fn load_runs_one_transaction() {
    let mut unit = LoadStoreUnit::new();
    issue(&mut unit, load(AccessWidth::Word, false));

    assert_eq!(unit.state(), LoadStoreState::Request);
    assert!(!unit.input_ready());
    assert!(!unit.output().valid);
    let bus = unit.bus();
    assert!(bus.stb && bus.cyc && !bus.we);
    assert_eq!((bus.adr, bus.sel), (0x100, 0xF));
    assert!(unit.pending_write().enable);
    assert_eq!(unit.pending_write().addr, 1);

    respond(&mut unit, BusResponse::ack(0xCAFE_F00D));
    assert_eq!(unit.state(), LoadStoreState::Latched);
    assert!(unit.bus().cyc && !unit.bus().stb);

    respond(&mut unit, BusResponse::default());
    assert_eq!(unit.state(), LoadStoreState::Idle);
    let out = unit.output();
    assert!(out.valid);
    assert_eq!(out.data.reg_data, 0xCAFE_F00D);
    assert_eq!(out.data.pc, 0x20);
    assert!(out.data.reg_write);
}

#[test]
fn signed_byte_load() {
    let mut unit = LoadStoreUnit::new();
    issue(&mut unit, load(AccessWidth::Byte, false));
    assert_eq!(unit.bus().sel, 0x1);
    respond(&mut unit, BusResponse::ack(0x0000_00F0));
    respond(&mut unit, BusResponse::default());
    assert_eq!(unit.output().data.reg_data, 0xFFFF_FFF0);
}

#[test]
fn unsigned_half_load() {
    let mut unit = LoadStoreUnit::new();
    issue(&mut unit, load(AccessWidth::Half, true));
    respond(&mut unit, BusResponse::ack(0x1234_8000));
    respond(&mut unit, BusResponse::default());
    assert_eq!(unit.output().data.reg_data, 0x0000_8000);
}

#[test]
fn store_drives_data_and_never_writes_back() {
    let mut unit = LoadStoreUnit::new();
    issue(
        &mut unit,
        ExecuteOutput {
            result: 0x200,
            ls_enable: true,
            ls_write: true,
            ls_write_data: 0xAB,
            ls_width: AccessWidth::Byte,
            ..ExecuteOutput::default()
        },
    );
    let bus = unit.bus();
    assert!(bus.we);
    assert_eq!((bus.adr, bus.dat, bus.sel), (0x200, 0xAB, 0x1));

    respond(&mut unit, BusResponse::ack(0x5555_5555));
    respond(&mut unit, BusResponse::default());
    assert!(unit.output().valid);
    assert!(!unit.output().data.reg_write);
    assert_eq!(unit.output().data.reg_data, 0);
}

#[test]
fn stall_then_wait_then_ack() {
    let mut unit = LoadStoreUnit::new();
    issue(&mut unit, load(AccessWidth::Word, false));

    respond(&mut unit, BusResponse::BLOCKED);
    assert_eq!(unit.state(), LoadStoreState::RequestStalled);
    assert!(unit.bus().stb);

    respond(&mut unit, BusResponse::default());
    assert_eq!(unit.state(), LoadStoreState::Wait);
    assert!(!unit.bus().stb && unit.bus().cyc);

    respond(&mut unit, BusResponse::ack(7));
    respond(&mut unit, BusResponse::default());
    assert_eq!(unit.output().data.reg_data, 7);
}

#[test]
fn busy_unit_ignores_new_input() {
    let mut unit = LoadStoreUnit::new();
    issue(&mut unit, load(AccessWidth::Word, false));
    issue(
        &mut unit,
        ExecuteOutput {
            result: 3,
            reg_write: true,
            reg_addr: 9,
            ..ExecuteOutput::default()
        },
    );
    assert_eq!(unit.state(), LoadStoreState::Wait);
    assert_eq!(unit.pending_write().addr, 1);
    assert!(!unit.output().valid);
}
