//! Multi-machine pipeline scenarios: five amplifier machines wired in
//! series, then in a feedback ring where the last machine's output loops
//! back into the first. Each machine owns its memory; the host moves values
//! between them one suspension at a time.

use intcode_vm::{
    Word,
    bytecode::program::Program,
    core::{Suspension, VirtualMachine},
};
use itertools::Itertools;

/// Runs the serial arrangement: each machine gets its phase setting, then
/// the previous machine's single output as its signal input.
fn serial_chain_signal(program: &Program, phases: &[Word]) -> Word {
    let mut signal = 0;
    for &phase in phases {
        let mut amplifier = VirtualMachine::with_inputs(program, [phase]);
        let outputs = amplifier.run_to_completion([signal]).unwrap();
        assert_eq!(outputs.len(), 1);
        signal = outputs[0];
    }
    signal
}

/// Runs the feedback arrangement: machines are driven round-robin, each
/// output handed to the next machine's pending input, until every machine
/// halts. The thruster signal is the last output of the final machine.
fn feedback_loop_signal(program: &Program, phases: &[Word]) -> Word {
    let mut amplifiers: Vec<VirtualMachine> = phases
        .iter()
        .map(|&phase| VirtualMachine::with_inputs(program, [phase]))
        .collect();

    let mut signal = 0;
    let mut halted = 0;
    let mut index = 0;
    while halted < amplifiers.len() {
        match amplifiers[index].run(Some(signal)).unwrap() {
            Suspension::Output(value) => signal = value,
            // The signal was just queued, so a blocked input here means the
            // ring itself is starved.
            Suspension::NeedsInput => panic!("amplifier {index} starved of input"),
            Suspension::Halted => halted += 1,
        }
        index = (index + 1) % amplifiers.len();
    }
    signal
}

#[test]
fn serial_chain_matches_published_signals() {
    let cases: [(&str, &[Word], Word); 3] = [
        (
            "3,15,3,16,1002,16,10,16,1,16,15,15,4,15,99,0,0",
            &[4, 3, 2, 1, 0],
            43210,
        ),
        (
            "3,23,3,24,1002,24,10,24,1002,23,-1,23,101,5,23,23,1,24,23,23,4,23,99,0,0",
            &[0, 1, 2, 3, 4],
            54321,
        ),
        (
            "3,31,3,32,1002,32,10,32,1001,31,-2,31,1007,31,0,33,1002,33,7,33,1,33,31,31,1,32,31,31,4,31,99,0,0,0",
            &[1, 0, 4, 3, 2],
            65210,
        ),
    ];

    for (source, phases, expected) in cases {
        let program: Program = source.parse().unwrap();
        assert_eq!(serial_chain_signal(&program, phases), expected);
    }
}

#[test]
fn serial_chain_max_signal_over_all_phase_orders() {
    let program: Program = "3,15,3,16,1002,16,10,16,1,16,15,15,4,15,99,0,0"
        .parse()
        .unwrap();

    let best = (0..5)
        .permutations(5)
        .map(|phases| serial_chain_signal(&program, &phases))
        .max()
        .unwrap();

    assert_eq!(best, 43210);
}

#[test]
fn feedback_loop_matches_published_signals() {
    let cases: [(&str, &[Word], Word); 2] = [
        (
            "3,26,1001,26,-4,26,3,27,1002,27,2,27,1,27,26,27,4,27,1001,28,-1,28,1005,28,6,99,0,0,5",
            &[9, 8, 7, 6, 5],
            139_629_729,
        ),
        (
            "3,52,1001,52,-5,52,3,53,1,52,56,54,1007,54,5,55,1005,55,26,1001,54,-5,54,1105,1,12,1,53,54,53,1008,54,0,55,1001,55,1,55,2,53,55,53,4,53,1001,56,-1,56,1005,56,6,99,0,0,0,0,10",
            &[9, 7, 8, 5, 6],
            18216,
        ),
    ];

    for (source, phases, expected) in cases {
        let program: Program = source.parse().unwrap();
        assert_eq!(feedback_loop_signal(&program, phases), expected);
    }
}

#[test]
fn feedback_loop_max_signal_over_all_phase_orders() {
    let program: Program =
        "3,26,1001,26,-4,26,3,27,1002,27,2,27,1,27,26,27,4,27,1001,28,-1,28,1005,28,6,99,0,0,5"
            .parse()
            .unwrap();

    let best = (5..10)
        .permutations(5)
        .map(|phases| feedback_loop_signal(&program, &phases))
        .max()
        .unwrap();

    assert_eq!(best, 139_629_729);
}

#[test]
fn machines_in_a_pipeline_never_share_memory() {
    // Two machines from the same program: writes in one must not be
    // observable in the other.
    let program: Program = "3,0,4,0,99".parse().unwrap();
    let mut first = VirtualMachine::new(&program);
    let mut second = VirtualMachine::new(&program);

    assert_eq!(first.run(Some(41)).unwrap(), Suspension::Output(41));
    assert_eq!(first.peek(0), 41);
    assert_eq!(second.peek(0), 3);

    // The hand-off is an explicit value, not an aliased cell.
    let handed_off = match first.run(None) {
        Ok(Suspension::Halted) => 41,
        other => panic!("unexpected suspension: {other:?}"),
    };
    assert_eq!(second.run(Some(handed_off)).unwrap(), Suspension::Output(41));
}
