//! External DIMACS solver invoked as a subprocess

use super::{Formula, SolverSolution};
use crate::config::OutputConvention;
use crate::error::{PuzzleError, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// SAT solver wrapper for an external binary such as MiniSat
///
/// Each solve runs in its own temporary directory holding the CNF input and
/// the solver's output; the directory and the child process are cleaned up on
/// every return path.
#[derive(Debug, Clone)]
pub struct ExternalSolver {
    binary: PathBuf,
    convention: OutputConvention,
    timeout: Option<Duration>,
}

/// Kills the child if it is still running when dropped
struct ChildGuard(Child);

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if let Ok(None) = self.0.try_wait() {
            let _ = self.0.kill();
            let _ = self.0.wait();
        }
    }
}

impl ExternalSolver {
    pub fn new(binary: impl Into<PathBuf>, convention: OutputConvention) -> Self {
        Self {
            binary: binary.into(),
            convention,
            timeout: None,
        }
    }

    /// Set solving timeout
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Solve a compiled formula
    pub fn solve(&self, formula: &Formula) -> Result<Option<SolverSolution>> {
        self.solve_clauses(formula.variable_count(), &formula.clause_strings())
    }

    /// Solve a formula given as a variable count and solver-text clauses
    pub fn solve_clauses(
        &self,
        variable_count: usize,
        clauses: &[String],
    ) -> Result<Option<SolverSolution>> {
        let workdir = tempfile::tempdir()?;
        let input_path = workdir.path().join("formula.cnf");
        let result_path = workdir.path().join("result.txt");
        let stdout_path = workdir.path().join("stdout.txt");

        std::fs::write(&input_path, dimacs_text(variable_count, clauses))?;

        let mut command = Command::new(&self.binary);
        command.arg(&input_path);
        if self.convention == OutputConvention::ResultFile {
            command.arg(&result_path);
        }
        command
            .stdin(Stdio::null())
            .stdout(Stdio::from(File::create(&stdout_path)?))
            .stderr(Stdio::null());

        tracing::debug!(binary = %self.binary.display(), variable_count, clauses = clauses.len(), "spawning solver");
        let start_time = Instant::now();
        let child = command.spawn().map_err(|e| PuzzleError::SolverUnavailable {
            binary: self.binary.display().to_string(),
            reason: e.to_string(),
        })?;
        let status = self.wait(ChildGuard(child), start_time)?;
        let solve_time = start_time.elapsed();
        tracing::debug!(?status, ?solve_time, "solver exited");

        let output = match self.convention {
            OutputConvention::ResultFile => std::fs::read_to_string(&result_path).map_err(|e| {
                PuzzleError::MalformedSolverOutput(format!(
                    "solver exited with {} without writing a result file: {}",
                    status, e
                ))
            })?,
            OutputConvention::Stdout => std::fs::read_to_string(&stdout_path)?,
        };

        let literals = parse_solver_output(&output, variable_count)?;
        Ok(literals.map(|literals| SolverSolution {
            literals,
            solve_time,
        }))
    }

    fn wait(&self, mut child: ChildGuard, start_time: Instant) -> Result<ExitStatus> {
        loop {
            if let Some(status) = child.0.try_wait()? {
                return Ok(status);
            }
            if let Some(limit) = self.timeout {
                if start_time.elapsed() >= limit {
                    tracing::warn!(?limit, "solver timed out, killing it");
                    return Err(PuzzleError::SolverTimeout(limit));
                }
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }
}

/// DIMACS text for a variable count and clauses in solver-text form
pub fn dimacs_text(variable_count: usize, clauses: &[String]) -> String {
    let mut out = format!("p cnf {} {}\n", variable_count, clauses.len());
    for clause in clauses {
        let clause = clause.trim();
        if clause.is_empty() {
            out.push_str("0\n");
        } else {
            out.push_str(clause);
            out.push_str(" 0\n");
        }
    }
    out
}

/// Parse the verdict and model written by a DIMACS solver
///
/// Understands MiniSat result files (`SAT` / `UNSAT` followed by a literal
/// line) and SAT-competition output (`s SATISFIABLE` with `v` lines). Returns
/// `None` for UNSAT, or one literal per variable ordered by variable.
/// Variables the solver leaves out are reported false.
pub fn parse_solver_output(output: &str, variable_count: usize) -> Result<Option<Vec<i32>>> {
    let mut verdict: Option<bool> = None;
    let mut values: Vec<Option<bool>> = vec![None; variable_count + 1];
    let mut terminated = false;

    for line in output.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let (tag, rest) = match line.split_once(char::is_whitespace) {
            Some((tag, rest)) => (tag, rest.trim()),
            None => (line, ""),
        };

        match tag {
            "c" => {}
            "SAT" => verdict = Some(true),
            "UNSAT" => verdict = Some(false),
            "INDET" => {
                return Err(PuzzleError::MalformedSolverOutput(
                    "solver gave up without a verdict (INDET)".to_string(),
                ))
            }
            "s" => {
                verdict = match rest {
                    "SATISFIABLE" => Some(true),
                    "UNSATISFIABLE" => Some(false),
                    other => {
                        return Err(PuzzleError::MalformedSolverOutput(format!(
                            "solver reported '{}'",
                            other
                        )))
                    }
                }
            }
            "v" => terminated |= read_literals(rest, &mut values)?,
            _ if verdict == Some(true) => terminated |= read_literals(line, &mut values)?,
            _ => {}
        }
    }

    match verdict {
        None => Err(PuzzleError::MalformedSolverOutput(
            "no SAT/UNSAT verdict found".to_string(),
        )),
        Some(false) => Ok(None),
        Some(true) => {
            if variable_count > 0 && !terminated && values.iter().all(Option::is_none) {
                return Err(PuzzleError::MalformedSolverOutput(
                    "satisfiable verdict without an assignment".to_string(),
                ));
            }
            let literals = (1..=variable_count)
                .map(|var| match values[var] {
                    Some(true) => var as i32,
                    _ => -(var as i32),
                })
                .collect();
            Ok(Some(literals))
        }
    }
}

/// Read whitespace separated literals; returns true once the closing `0` is seen
fn read_literals(text: &str, values: &mut [Option<bool>]) -> Result<bool> {
    for token in text.split_whitespace() {
        let literal: i32 = token.parse().map_err(|_| {
            PuzzleError::MalformedSolverOutput(format!("'{}' is not a literal", token))
        })?;
        if literal == 0 {
            return Ok(true);
        }
        let var = literal.unsigned_abs() as usize;
        if var >= values.len() {
            return Err(PuzzleError::MalformedSolverOutput(format!(
                "literal {} exceeds variable count {}",
                literal,
                values.len() - 1
            )));
        }
        values[var] = Some(literal > 0);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minisat_result_file() {
        let parsed = parse_solver_output("SAT\n1 -2 3 -4 0\n", 4).unwrap();
        assert_eq!(parsed, Some(vec![1, -2, 3, -4]));

        assert_eq!(parse_solver_output("UNSAT\n", 4).unwrap(), None);
    }

    #[test]
    fn test_competition_output() {
        let output = "c kissat\ns SATISFIABLE\nv -1 2\nv 3 0\n";
        let parsed = parse_solver_output(output, 3).unwrap();
        assert_eq!(parsed, Some(vec![-1, 2, 3]));

        let output = "c comment\ns UNSATISFIABLE\n";
        assert_eq!(parse_solver_output(output, 3).unwrap(), None);
    }

    #[test]
    fn test_missing_variables_default_to_false() {
        let parsed = parse_solver_output("SAT\n2 0\n", 3).unwrap();
        assert_eq!(parsed, Some(vec![-1, 2, -3]));
    }

    #[test]
    fn test_malformed_output() {
        assert!(matches!(
            parse_solver_output("", 2),
            Err(PuzzleError::MalformedSolverOutput(_))
        ));
        assert!(parse_solver_output("INDET\n", 2).is_err());
        assert!(parse_solver_output("SAT\n1 x 0\n", 2).is_err());
        assert!(parse_solver_output("SAT\n1 7 0\n", 2).is_err());
        assert!(parse_solver_output("SAT\n", 2).is_err());
        assert!(parse_solver_output("s UNKNOWN\n", 2).is_err());
    }

    #[test]
    fn test_satisfiable_without_variables() {
        assert_eq!(parse_solver_output("SAT\n0\n", 0).unwrap(), Some(vec![]));
        assert_eq!(parse_solver_output("SAT\n", 0).unwrap(), Some(vec![]));
    }

    #[test]
    fn test_dimacs_text() {
        let clauses = vec!["1 -2".to_string(), String::new()];
        assert_eq!(dimacs_text(2, &clauses), "p cnf 2 2\n1 -2 0\n0\n");
    }

    #[test]
    fn test_missing_binary_is_unavailable() {
        let solver = ExternalSolver::new(
            "/nonexistent/path/to/minisat",
            OutputConvention::ResultFile,
        );
        let err = solver.solve_clauses(1, &["1".to_string()]).unwrap_err();
        assert!(matches!(err, PuzzleError::SolverUnavailable { .. }));
    }

    #[cfg(unix)]
    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    fn two_variable_formula() -> Formula {
        use crate::sat::{Clause, LiteralIndex};

        let index = LiteralIndex::new(1, 2).unwrap();
        let mut formula = Formula::new(index);
        let mut clause = Clause::new(index);
        clause.add_positive(0, 0).unwrap();
        formula.push(clause);
        formula
    }

    #[cfg(unix)]
    #[test]
    fn test_result_file_solver() {
        let scripts = tempfile::tempdir().unwrap();
        let binary = write_script(scripts.path(), "fake_minisat", r#"printf 'SAT\n1 -2 0\n' > "$2""#);

        let solver = ExternalSolver::new(binary, OutputConvention::ResultFile);
        let solution = solver.solve(&two_variable_formula()).unwrap().unwrap();
        assert_eq!(solution.literals, vec![1, -2]);
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_solver_and_unsat() {
        let scripts = tempfile::tempdir().unwrap();
        let sat = write_script(scripts.path(), "sat", "echo 's SATISFIABLE'; echo 'v 1 -2 0'");
        let unsat = write_script(scripts.path(), "unsat", r#"echo UNSAT > "$2""#);

        let solution = ExternalSolver::new(sat, OutputConvention::Stdout)
            .solve(&two_variable_formula())
            .unwrap();
        assert_eq!(solution.map(|s| s.literals), Some(vec![1, -2]));

        let verdict = ExternalSolver::new(unsat, OutputConvention::ResultFile)
            .solve(&two_variable_formula())
            .unwrap();
        assert!(verdict.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_solver_receives_dimacs_input() {
        let scripts = tempfile::tempdir().unwrap();
        // echo the input header back as a malformed verdict
        let binary = write_script(scripts.path(), "echo_header", r#"head -n 1 "$1" > "$2""#);

        let err = ExternalSolver::new(binary, OutputConvention::ResultFile)
            .solve(&two_variable_formula())
            .unwrap_err();
        match err {
            PuzzleError::MalformedSolverOutput(message) => {
                assert!(message.contains("verdict"), "{}", message)
            }
            other => panic!("expected malformed output, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_slow_solver_is_killed() {
        let scripts = tempfile::tempdir().unwrap();
        let binary = write_script(scripts.path(), "slow", "sleep 30");

        let mut solver = ExternalSolver::new(binary, OutputConvention::ResultFile);
        solver.set_timeout(Duration::from_millis(200));

        let start = Instant::now();
        let err = solver.solve(&two_variable_formula()).unwrap_err();
        assert!(matches!(err, PuzzleError::SolverTimeout(limit) if limit == Duration::from_millis(200)));
        assert!(start.elapsed() < Duration::from_secs(10));
    }
}
