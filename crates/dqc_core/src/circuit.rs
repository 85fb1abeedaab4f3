//! Quantum circuit structure for DQC
//!
//! Gantree: L1_Circuit → Circuit
//!
//! Append-only operation sequence over a fixed qubit array plus a growable
//! classical bit array partitioned into named registers. Every appender
//! validates before it mutates, so a rejected operation leaves the
//! circuit untouched.

use crate::error::{DqcError, DqcResult};
use crate::gate::Gate;
use crate::kraus::KrausChannel;
use crate::operation::Operation;
use crate::types::{Angle, ClassicalRegister, ClbitId, QubitId};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Normalization tolerance for `initialize`
const NORM_TOLERANCE: f64 = 1e-10;

/// Quantum circuit
/// Gantree: Circuit // 회로 구조체
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CircuitData")]
pub struct Circuit {
    /// Number of qubits
    /// Gantree: num_qubits: usize // 큐비트 수
    num_qubits: usize,

    /// Classical registers, in allocation order
    /// Gantree: registers: Vec<ClassicalRegister> // 고전 레지스터
    registers: Vec<ClassicalRegister>,

    /// Operation sequence
    /// Gantree: ops: Vec<Operation> // 연산 목록
    ops: Vec<Operation>,

    /// Optional circuit name
    name: Option<String>,
}

impl Circuit {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a new empty circuit with no classical bits
    /// Gantree: new(n) -> Self // 생성자
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            registers: Vec::new(),
            ops: Vec::new(),
            name: None,
        }
    }

    /// Create a circuit with a classical register `c` of `num_clbits` bits
    pub fn with_clbits(num_qubits: usize, num_clbits: usize) -> Self {
        let mut circuit = Self::new(num_qubits);
        if num_clbits > 0 {
            circuit
                .registers
                .push(ClassicalRegister::new("c", 0, num_clbits));
        }
        circuit
    }

    /// Create a circuit with a name
    pub fn with_name(num_qubits: usize, name: impl Into<String>) -> Self {
        let mut circuit = Self::new(num_qubits);
        circuit.name = Some(name.into());
        circuit
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get number of classical bits across all registers
    pub fn num_clbits(&self) -> usize {
        self.registers.iter().map(|r| r.len()).sum()
    }

    /// Get operations
    pub fn ops(&self) -> &[Operation] {
        &self.ops
    }

    /// Get classical registers
    pub fn registers(&self) -> &[ClassicalRegister] {
        &self.registers
    }

    /// Look up a classical register by name
    pub fn register(&self, name: &str) -> Option<&ClassicalRegister> {
        self.registers.iter().find(|r| r.name() == name)
    }

    /// Get circuit name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set circuit name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Check if circuit is empty
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    // ========================================================================
    // Classical Registers
    // ========================================================================

    /// Allocate a fresh classical register at the end of the bit array
    /// Gantree: add_register(&mut, name, n) -> Result<Reg> // 레지스터 할당
    pub fn add_register(
        &mut self,
        name: impl Into<String>,
        size: usize,
    ) -> DqcResult<ClassicalRegister> {
        let name = name.into();
        if self.register(&name).is_some() {
            return Err(DqcError::DuplicateRegister(name));
        }
        let register = ClassicalRegister::new(name, self.num_clbits(), size);
        self.registers.push(register.clone());
        Ok(register)
    }

    // ========================================================================
    // Appending
    // ========================================================================

    /// Validate and append one operation
    /// Gantree: append(&mut, Operation) -> Result // 연산 추가
    pub fn append(&mut self, op: impl Into<Operation>) -> DqcResult<&mut Self> {
        let op = op.into();
        self.validate_op(&op)?;
        self.ops.push(op);
        Ok(self)
    }

    /// Validate every operation first, then append them all
    ///
    /// Either the whole batch lands or nothing does.
    pub fn append_all(&mut self, ops: Vec<Operation>) -> DqcResult<&mut Self> {
        for op in &ops {
            self.validate_op(op)?;
        }
        self.ops.extend(ops);
        Ok(self)
    }

    /// Hadamard
    pub fn h(&mut self, qubit: QubitId) -> DqcResult<&mut Self> {
        self.append(Gate::H(qubit))
    }

    /// Pauli-X
    pub fn x(&mut self, qubit: QubitId) -> DqcResult<&mut Self> {
        self.append(Gate::X(qubit))
    }

    /// Pauli-Y
    pub fn y(&mut self, qubit: QubitId) -> DqcResult<&mut Self> {
        self.append(Gate::Y(qubit))
    }

    /// Pauli-Z
    pub fn z(&mut self, qubit: QubitId) -> DqcResult<&mut Self> {
        self.append(Gate::Z(qubit))
    }

    /// S gate
    pub fn s(&mut self, qubit: QubitId) -> DqcResult<&mut Self> {
        self.append(Gate::S(qubit))
    }

    /// S-dagger gate
    pub fn sdg(&mut self, qubit: QubitId) -> DqcResult<&mut Self> {
        self.append(Gate::Sdg(qubit))
    }

    /// T gate
    pub fn t(&mut self, qubit: QubitId) -> DqcResult<&mut Self> {
        self.append(Gate::T(qubit))
    }

    /// T-dagger gate
    pub fn tdg(&mut self, qubit: QubitId) -> DqcResult<&mut Self> {
        self.append(Gate::Tdg(qubit))
    }

    /// Rx rotation
    pub fn rx(&mut self, qubit: QubitId, angle: Angle) -> DqcResult<&mut Self> {
        self.append(Gate::Rx(qubit, angle))
    }

    /// Ry rotation
    pub fn ry(&mut self, qubit: QubitId, angle: Angle) -> DqcResult<&mut Self> {
        self.append(Gate::Ry(qubit, angle))
    }

    /// Rz rotation
    pub fn rz(&mut self, qubit: QubitId, angle: Angle) -> DqcResult<&mut Self> {
        self.append(Gate::Rz(qubit, angle))
    }

    /// Controlled-NOT
    /// Gantree: cx(&mut, c, t) -> Result // CNOT 추가
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> DqcResult<&mut Self> {
        self.append(Gate::Cnot(control, target))
    }

    /// Controlled-Z
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> DqcResult<&mut Self> {
        self.append(Gate::Cz(control, target))
    }

    /// SWAP
    pub fn swap(&mut self, qubit1: QubitId, qubit2: QubitId) -> DqcResult<&mut Self> {
        self.append(Gate::Swap(qubit1, qubit2))
    }

    /// Measure `qubit` into `clbit`
    /// Gantree: measure(&mut, q, c) -> Result // 측정 추가
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> DqcResult<&mut Self> {
        self.append(Operation::Measure { qubit, clbit })
    }

    /// Add a `meas` register and measure every qubit into it
    /// Gantree: measure_all(&mut) -> Result<Reg> // 전체 측정
    pub fn measure_all(&mut self) -> DqcResult<ClassicalRegister> {
        let register = self.add_register("meas", self.num_qubits)?;
        let ops = (0..self.num_qubits)
            .map(|q| Operation::Measure {
                qubit: q,
                clbit: register.offset() + q,
            })
            .collect();
        self.append_all(ops)?;
        Ok(register)
    }

    /// Reset qubit to |0⟩
    pub fn reset(&mut self, qubit: QubitId) -> DqcResult<&mut Self> {
        self.append(Operation::Reset(qubit))
    }

    /// Barrier across all qubits
    pub fn barrier(&mut self) -> DqcResult<&mut Self> {
        self.append(Operation::Barrier((0..self.num_qubits).collect()))
    }

    /// Prepare `amplitudes[0]|0⟩ + amplitudes[1]|1⟩` on `qubit`
    pub fn initialize(
        &mut self,
        qubit: QubitId,
        amplitudes: [Complex64; 2],
    ) -> DqcResult<&mut Self> {
        self.append(Operation::Initialize { qubit, amplitudes })
    }

    /// Insert one application of a noise channel on `qubit`
    /// Gantree: apply_channel(&mut, ch, q) -> Result // 노이즈 삽입
    pub fn apply_channel(&mut self, channel: &KrausChannel, qubit: QubitId) -> DqcResult<&mut Self> {
        self.append(Operation::Channel {
            channel: channel.clone(),
            qubit,
        })
    }

    /// Append `body`, executed only when `clbit == value` at run time
    /// Gantree: if_test(&mut, c, v, body) -> Result // 조건부 블록
    pub fn if_test(
        &mut self,
        clbit: ClbitId,
        value: bool,
        body: Vec<Operation>,
    ) -> DqcResult<&mut Self> {
        self.append(Operation::IfTest { clbit, value, body })
    }

    // ========================================================================
    // Circuit Analysis
    // ========================================================================

    /// Calculate circuit depth (longest path over qubits)
    /// Gantree: depth(&self) -> usize // 깊이 계산
    pub fn depth(&self) -> usize {
        let mut qubit_depths = vec![0usize; self.num_qubits];

        for op in &self.ops {
            let qubits = op.qubits();
            let max_depth = qubits
                .iter()
                .filter_map(|&q| qubit_depths.get(q))
                .max()
                .copied()
                .unwrap_or(0);
            for &q in &qubits {
                if q < self.num_qubits {
                    qubit_depths[q] = max_depth + 1;
                }
            }
        }

        qubit_depths.into_iter().max().unwrap_or(0)
    }

    /// Get total operation count (top level)
    pub fn gate_count(&self) -> usize {
        self.ops.len()
    }

    /// Count single-qubit gates
    pub fn count_1q(&self) -> usize {
        self.count_gates(|g| g.is_single_qubit())
    }

    /// Count two-qubit gates
    /// Gantree: count_2q(&self) -> usize // 2Q 수
    pub fn count_2q(&self) -> usize {
        self.count_gates(|g| g.is_two_qubit())
    }

    /// Count measurement operations
    pub fn count_measurements(&self) -> usize {
        self.ops.iter().filter(|op| op.is_measurement()).count()
    }

    /// Count noise channel insertions
    pub fn count_channels(&self) -> usize {
        self.ops.iter().filter(|op| op.is_channel()).count()
    }

    /// Count conditional blocks
    pub fn count_conditionals(&self) -> usize {
        self.ops.iter().filter(|op| op.is_conditional()).count()
    }

    /// Get qubits used in the circuit
    pub fn used_qubits(&self) -> HashSet<QubitId> {
        self.ops.iter().flat_map(|op| op.qubits()).collect()
    }

    fn count_gates(&self, pred: impl Fn(&Gate) -> bool) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Operation::Gate(g) if pred(g)))
            .count()
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Re-check the register layout and every operation
    ///
    /// Circuits built through the appenders always pass. Deserialized
    /// circuits are checked here before they are handed out.
    /// Gantree: validate(&self) -> Result // 전체 검증
    pub fn validate(&self) -> DqcResult<()> {
        let mut names = HashSet::new();
        let mut next = 0;
        for reg in &self.registers {
            if !names.insert(reg.name()) {
                return Err(DqcError::DuplicateRegister(reg.name().to_string()));
            }
            if reg.offset() != next {
                return Err(DqcError::InvalidState(format!(
                    "register {} starts at bit {}, expected {}",
                    reg,
                    reg.offset(),
                    next
                )));
            }
            next += reg.len();
        }

        for op in &self.ops {
            self.validate_op(op)?;
        }
        Ok(())
    }

    /// Validate a single operation against this circuit's bounds
    fn validate_op(&self, op: &Operation) -> DqcResult<()> {
        match op {
            Operation::Gate(gate) => {
                self.check_distinct_qubits(&gate.qubits())?;
                if let Some(angle) = gate.angle() {
                    if !angle.is_finite() {
                        return Err(DqcError::InvalidAngle(angle));
                    }
                }
            }
            Operation::Measure { qubit, clbit } => {
                self.check_qubit(*qubit)?;
                self.check_clbit(*clbit)?;
            }
            Operation::Reset(qubit) | Operation::Channel { qubit, .. } => {
                self.check_qubit(*qubit)?;
            }
            Operation::Initialize { qubit, amplitudes } => {
                self.check_qubit(*qubit)?;
                let norm: f64 = amplitudes.iter().map(|a| a.norm_sqr()).sum();
                if !norm.is_finite() || (norm - 1.0).abs() > NORM_TOLERANCE {
                    return Err(DqcError::InvalidState(format!(
                        "amplitudes have squared norm {}, expected 1",
                        norm
                    )));
                }
            }
            Operation::Barrier(qubits) => {
                for &q in qubits {
                    self.check_qubit(q)?;
                }
            }
            Operation::IfTest { clbit, body, .. } => {
                self.check_clbit(*clbit)?;
                for inner in body {
                    self.validate_op(inner)?;
                }
            }
        }
        Ok(())
    }

    fn check_qubit(&self, qubit: QubitId) -> DqcResult<()> {
        if qubit >= self.num_qubits {
            return Err(DqcError::qubit_out_of_range(qubit, self.num_qubits));
        }
        Ok(())
    }

    fn check_clbit(&self, clbit: ClbitId) -> DqcResult<()> {
        let bound = self.num_clbits();
        if clbit >= bound {
            return Err(DqcError::clbit_out_of_range(clbit, bound));
        }
        Ok(())
    }

    fn check_distinct_qubits(&self, qubits: &[QubitId]) -> DqcResult<()> {
        let mut seen = HashSet::new();
        for &q in qubits {
            self.check_qubit(q)?;
            if !seen.insert(q) {
                return Err(DqcError::DuplicateQubit(q));
            }
        }
        Ok(())
    }

    // ========================================================================
    // QASM Listing
    // ========================================================================

    /// Render as OpenQASM 3 text
    ///
    /// Noise channels and state initialization have no QASM form and are
    /// emitted as comments.
    /// Gantree: to_qasm(&self) -> String // QASM3 출력
    pub fn to_qasm(&self) -> String {
        let mut lines = vec![
            "OPENQASM 3.0;".to_string(),
            "include \"stdgates.inc\";".to_string(),
            String::new(),
            format!("qubit[{}] q;", self.num_qubits),
        ];
        if self.num_clbits() > 0 {
            lines.push(format!("bit[{}] c;", self.num_clbits()));
            for reg in &self.registers {
                lines.push(format!(
                    "// {} -> c[{}..{}]",
                    reg,
                    reg.offset(),
                    reg.offset() + reg.len()
                ));
            }
        }
        lines.push(String::new());

        for op in &self.ops {
            lines.extend(op.to_qasm_lines(0));
        }

        lines.join("\n")
    }
}

// ============================================================================
// Deserialization
// ============================================================================

/// Unchecked wire form, validated through [`Circuit::validate`]
#[derive(Deserialize)]
struct CircuitData {
    num_qubits: usize,
    registers: Vec<ClassicalRegister>,
    ops: Vec<Operation>,
    name: Option<String>,
}

impl TryFrom<CircuitData> for Circuit {
    type Error = DqcError;

    fn try_from(data: CircuitData) -> DqcResult<Self> {
        let circuit = Self {
            num_qubits: data.num_qubits,
            registers: data.registers,
            ops: data.ops,
            name: data.name,
        };
        circuit.validate()?;
        Ok(circuit)
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit({} qubits, {} clbits, {} ops)",
            self.num_qubits,
            self.num_clbits(),
            self.ops.len()
        )?;
        writeln!(f, "  Depth: {}", self.depth())?;
        writeln!(f, "  1Q gates: {}", self.count_1q())?;
        writeln!(f, "  2Q gates: {}", self.count_2q())?;
        writeln!(f, "  Channels: {}", self.count_channels())?;
        writeln!(f, "  Conditionals: {}", self.count_conditionals())?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
