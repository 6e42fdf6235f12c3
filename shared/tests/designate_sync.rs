use std::collections::HashSet;
use std::rc::Rc;

use lockstep_shared::{
    Action, BitReader, Cell, CommandKind, DesignateCells, DesignateMode, DesignateWorld,
    InstallObject, NullCaptureEnv, ObjectId, Protocol, QueueTransport, ReplayGuard, ScopeId,
    Serde, SyncSession, SyncState, Verdict,
};

struct TestWorld {
    scopes: HashSet<ScopeId>,
    objects: HashSet<(ScopeId, ObjectId)>,
    state: Rc<SyncState>,
    single_calls: Vec<(ScopeId, Cell)>,
    multi_calls: Vec<(ScopeId, Vec<Cell>)>,
    object_calls: Vec<(ScopeId, ObjectId)>,
    observed_install_targets: Vec<Option<ObjectId>>,
    observed_replaying: Vec<bool>,
}

impl TestWorld {
    fn new(state: Rc<SyncState>) -> Self {
        Self {
            scopes: HashSet::new(),
            objects: HashSet::new(),
            state,
            single_calls: Vec::new(),
            multi_calls: Vec::new(),
            object_calls: Vec::new(),
            observed_install_targets: Vec::new(),
            observed_replaying: Vec::new(),
        }
    }
}

impl DesignateWorld for TestWorld {
    fn contains_scope(&self, scope: ScopeId) -> bool {
        self.scopes.contains(&scope)
    }

    fn resolve_object(&self, scope: ScopeId, object: ObjectId) -> bool {
        self.objects.contains(&(scope, object))
    }

    fn designate_single(&mut self, scope: ScopeId, _action: &dyn Action, cell: Cell) {
        self.observed_replaying.push(self.state.replaying());
        self.single_calls.push((scope, cell));
    }

    fn designate_multi(&mut self, scope: ScopeId, _action: &dyn Action, cells: &[Cell]) {
        self.observed_replaying.push(self.state.replaying());
        self.multi_calls.push((scope, cells.to_vec()));
    }

    fn designate_object(&mut self, scope: ScopeId, _action: &dyn Action, object: ObjectId) {
        self.observed_replaying.push(self.state.replaying());
        self.observed_install_targets
            .push(self.state.install_target(None));
        self.object_calls.push((scope, object));
    }
}

fn new_session() -> (SyncSession, QueueTransport) {
    let transport = QueueTransport::new();
    let session = SyncSession::new(
        Protocol::builder().add_default_actions().build(),
        Box::new(transport.clone()),
    );
    (session, transport)
}

#[test]
fn single_cell_designation_is_captured_not_applied() {
    let (mut session, transport) = new_session();
    let action = DesignateCells { designation: 7 };

    let verdict = session.intercept_single(3, &action, Cell::new(10, 5, 3), &mut NullCaptureEnv);

    assert_eq!(verdict, Verdict::Captured);
    let commands = transport.drain();
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].scope, 3);
    assert_eq!(commands[0].kind, CommandKind::Designator);

    // The payload decodes back to exactly what was captured.
    let mut reader = BitReader::new(&commands[0].payload);
    assert_eq!(
        DesignateMode::de(&mut reader).unwrap(),
        DesignateMode::SingleCell
    );
    let decoded = session
        .protocol()
        .action_kinds
        .read(&mut reader)
        .unwrap();
    let decoded = decoded.as_any().downcast_ref::<DesignateCells>().unwrap();
    assert_eq!(decoded.designation, 7);
    assert_eq!(Cell::de(&mut reader).unwrap(), Cell::new(10, 5, 3));
}

#[test]
fn captured_command_replays_through_the_world() {
    let (mut session, transport) = new_session();
    let mut world = TestWorld::new(session.state());
    world.scopes.insert(3);

    session.intercept_single(
        3,
        &DesignateCells { designation: 7 },
        Cell::new(10, 5, 3),
        &mut NullCaptureEnv,
    );
    let commands = transport.drain();
    session.deliver(&mut world, &commands[0]).unwrap();

    assert_eq!(world.single_calls, vec![(3, Cell::new(10, 5, 3))]);
    assert_eq!(world.observed_replaying, vec![true]);
    // The gate dropped once the world call returned.
    assert!(!session.state().replaying());
}

#[test]
fn empty_multi_cell_designation_passes_through() {
    let (mut session, transport) = new_session();

    let verdict = session.intercept_multi(
        3,
        &DesignateCells { designation: 7 },
        &[],
        &mut NullCaptureEnv,
    );

    assert_eq!(verdict, Verdict::Passthrough);
    assert!(transport.is_empty());
}

#[test]
fn multi_cell_designation_round_trips() {
    let (mut session, transport) = new_session();
    let mut world = TestWorld::new(session.state());
    world.scopes.insert(1);

    let cells = vec![Cell::new(0, 0, 0), Cell::new(1, 0, 0), Cell::new(2, 0, 0)];
    session.intercept_multi(
        1,
        &DesignateCells { designation: 2 },
        &cells,
        &mut NullCaptureEnv,
    );

    let commands = transport.drain();
    session.deliver(&mut world, &commands[0]).unwrap();

    assert_eq!(world.multi_calls, vec![(1, cells)]);
}

#[test]
fn install_replay_pins_the_decoded_target() {
    struct SelectionEnv {
        selection: ObjectId,
        feedback: Vec<ObjectId>,
    }
    impl lockstep_shared::CaptureEnv for SelectionEnv {
        fn selected_install_target(&self) -> Option<ObjectId> {
            Some(self.selection)
        }
        fn visual_feedback(&mut self, target: ObjectId) {
            self.feedback.push(target);
        }
    }

    let (mut session, transport) = new_session();
    let mut world = TestWorld::new(session.state());
    world.scopes.insert(1);
    world.objects.insert((1, ObjectId::new(42)));

    let mut env = SelectionEnv {
        selection: ObjectId::new(42),
        feedback: Vec::new(),
    };
    // The action itself carries no target; capture bakes the selection in.
    let verdict = session.intercept_object(
        1,
        &InstallObject { target: None },
        ObjectId::new(42),
        &mut env,
    );
    assert_eq!(verdict, Verdict::Captured);

    // Cosmetic feedback fired locally, at capture time.
    assert_eq!(env.feedback, vec![ObjectId::new(42)]);

    let commands = transport.drain();
    session.deliver(&mut world, &commands[0]).unwrap();

    assert_eq!(world.object_calls, vec![(1, ObjectId::new(42))]);
    // During the world call the decoded target shadowed any local selection.
    assert_eq!(world.observed_install_targets, vec![Some(ObjectId::new(42))]);
    // The override dropped with the replay window.
    assert_eq!(session.state().install_target(None), None);
}

#[test]
fn command_survives_a_byte_framed_hop() {
    use lockstep_shared::{BitWriter, Command};

    let (mut session, transport) = new_session();
    let mut world = TestWorld::new(session.state());
    world.scopes.insert(2);

    session.intercept_single(
        2,
        &DesignateCells { designation: 5 },
        Cell::new(8, 0, 8),
        &mut NullCaptureEnv,
    );

    // Frame the command to raw bytes and back, as a byte transport would.
    let captured = transport.drain().remove(0);
    let mut writer = BitWriter::new();
    captured.ser(&mut writer);
    let wire = writer.to_bytes();

    let mut reader = BitReader::new(&wire);
    let delivered = Command::de(&mut reader).unwrap();
    assert_eq!(delivered, captured);

    session.deliver(&mut world, &delivered).unwrap();
    assert_eq!(world.single_calls, vec![(2, Cell::new(8, 0, 8))]);
}

#[test]
fn capture_is_deterministic() {
    let (mut session, transport) = new_session();

    for _ in 0..2 {
        session.intercept_single(
            9,
            &DesignateCells { designation: 4 },
            Cell::new(-3, 0, 17),
            &mut NullCaptureEnv,
        );
    }

    let commands = transport.drain();
    assert_eq!(commands[0].payload, commands[1].payload);
}

#[test]
fn replay_window_suppresses_recapture() {
    let (mut session, transport) = new_session();
    let state = session.state();

    let _replaying = ReplayGuard::new(&state);
    let verdict = session.intercept_single(
        1,
        &DesignateCells { designation: 1 },
        Cell::new(0, 0, 0),
        &mut NullCaptureEnv,
    );

    assert_eq!(verdict, Verdict::Passthrough);
    assert!(transport.is_empty());
}

#[test]
fn inactive_session_passes_everything_through() {
    let (mut session, transport) = new_session();
    session.set_active(false);

    let verdict = session.intercept_single(
        1,
        &DesignateCells { designation: 1 },
        Cell::new(0, 0, 0),
        &mut NullCaptureEnv,
    );

    assert_eq!(verdict, Verdict::Passthrough);
    assert!(transport.is_empty());
    assert!(session.finalize_allowed(true));
}

#[test]
fn sync_irrelevant_action_passes_through() {
    struct CameraTool;
    impl lockstep_shared::Named for CameraTool {
        fn name(&self) -> String {
            "CameraTool".to_string()
        }
    }
    impl Action for CameraTool {
        fn kind(&self) -> lockstep_shared::ActionKind {
            lockstep_shared::ActionKind::of::<Self>()
        }
        fn write_fields(
            &self,
            _writer: &mut dyn lockstep_shared::BitWrite,
            _env: &dyn lockstep_shared::CaptureEnv,
        ) {
        }
        fn relevant_to_sync(&self) -> bool {
            false
        }
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
        fn create_builder() -> Box<dyn lockstep_shared::ActionBuilder> {
            unreachable!("never registered")
        }
    }

    let (mut session, transport) = new_session();
    let verdict = session.intercept_single(1, &CameraTool, Cell::new(0, 0, 0), &mut NullCaptureEnv);

    assert_eq!(verdict, Verdict::Passthrough);
    assert!(transport.is_empty());
}

#[test]
fn finalize_waits_for_replay() {
    let (session, _transport) = new_session();

    // Nothing succeeded locally: finalizing is harmless.
    assert!(session.finalize_allowed(false));
    // Success outside a replay window means the work was captured, not
    // applied; finalizing now would deselect before the effect lands.
    assert!(!session.finalize_allowed(true));

    let state = session.state();
    let _replaying = ReplayGuard::new(&state);
    assert!(session.finalize_allowed(true));
}

#[test]
fn capture_records_an_encode_trace() {
    let (mut session, _transport) = new_session();
    assert!(session.trace_log().is_empty());

    session.intercept_single(
        1,
        &DesignateCells { designation: 7 },
        Cell::new(2, 2, 2),
        &mut NullCaptureEnv,
    );

    assert_eq!(session.trace_log().len(), 1);
    let trace = session.trace_log().iter().next().unwrap();
    assert!(trace.label().contains("DesignateCells"));
    assert!(trace.children().iter().any(|c| c.label().starts_with("cell:")));
}
