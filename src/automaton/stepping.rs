//! Elementary automaton stepping over a toroidal row.

use super::grid::wrap_index;
use super::rule::RuleTable;
use crate::state::State;

/// Read-only view of a row of cells.
pub trait CellRead {
    fn len(&self) -> usize;
    fn read(&self, i: usize) -> u8;
}

/// Write-only sink for the next row.
pub trait CellWrite {
    fn write(&mut self, i: usize, value: u8);
}

impl CellRead for [u8] {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    #[inline]
    fn read(&self, i: usize) -> u8 {
        self[i]
    }
}

impl CellWrite for [u8] {
    #[inline]
    fn write(&mut self, i: usize, value: u8) {
        self[i] = value;
    }
}

/// The (left, center, right) neighborhood of `i`, wrapping at both ends.
#[inline]
pub fn neighborhood<R: CellRead + ?Sized>(src: &R, i: usize) -> (u8, u8, u8) {
    let len = src.len();
    let left = src.read(wrap_index(i as isize - 1, len));
    let center = src.read(i);
    let right = src.read(wrap_index(i as isize + 1, len));
    (left, center, right)
}

/// Compute the next row of `src` into `dst`.
///
/// `src` is only read and `dst` only written, so no cell is ever computed
/// from a neighbor that was already updated in the same pass.
pub fn step_cells<R, W>(src: &R, dst: &mut W, rule: &RuleTable)
where
    R: CellRead + ?Sized,
    W: CellWrite + ?Sized,
{
    for i in 0..src.len() {
        let (left, center, right) = neighborhood(src, i);
        dst.write(i, rule.apply(left, center, right));
    }
}

/// Step the automaton forward by one generation.
pub fn step_automaton(state: &mut State) {
    if state.cells.is_empty() {
        return;
    }

    let mut next_cells = vec![0; state.cells.len()];
    step_cells(state.cells.as_slice(), next_cells.as_mut_slice(), &state.rule);

    state.cells = next_cells;
    state.generation += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::grid::create_grid;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, PartialEq, Clone, Copy)]
    enum Access {
        Read(usize),
        Write(usize),
    }

    /// Input row that logs every read.
    struct TracedInput {
        cells: Vec<u8>,
        log: Rc<RefCell<Vec<Access>>>,
    }

    impl CellRead for TracedInput {
        fn len(&self) -> usize {
            self.cells.len()
        }

        fn read(&self, i: usize) -> u8 {
            self.log.borrow_mut().push(Access::Read(i));
            self.cells[i]
        }
    }

    /// Output row that logs writes and trips on any read.
    struct TripwireOutput {
        cells: Vec<u8>,
        log: Rc<RefCell<Vec<Access>>>,
    }

    impl CellWrite for TripwireOutput {
        fn write(&mut self, i: usize, value: u8) {
            assert!(
                !self.log.borrow().contains(&Access::Write(i)),
                "index {} written twice",
                i
            );
            self.log.borrow_mut().push(Access::Write(i));
            self.cells[i] = value;
        }
    }

    impl CellRead for TripwireOutput {
        fn len(&self) -> usize {
            self.cells.len()
        }

        fn read(&self, i: usize) -> u8 {
            panic!("output index {} read during step", i);
        }
    }

    fn traced_step(cells: Vec<u8>, rule: u8) -> (Vec<u8>, Vec<Access>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let width = cells.len();
        let input = TracedInput {
            cells,
            log: log.clone(),
        };
        let mut output = TripwireOutput {
            cells: vec![0; width],
            log: log.clone(),
        };

        step_cells(&input, &mut output, &RuleTable::new(rule));

        let accesses = log.borrow().clone();
        (output.cells, accesses)
    }

    #[test]
    fn test_rule_90_sierpinski() {
        let mut state = create_grid(9, RuleTable::new(90)).unwrap();
        assert_eq!(state.cells, vec![0, 0, 0, 0, 1, 0, 0, 0, 0]);

        step_automaton(&mut state);
        assert_eq!(state.cells, vec![0, 0, 0, 1, 0, 1, 0, 0, 0]);
        assert_eq!(state.generation, 1);

        step_automaton(&mut state);
        assert_eq!(state.cells, vec![0, 0, 1, 0, 0, 0, 1, 0, 0]);
        assert_eq!(state.generation, 2);
    }

    #[test]
    fn test_reads_only_input_before_each_write() {
        let (cells, log) = traced_step(vec![0, 0, 0, 0, 1, 0, 0, 0, 0], 90);
        assert_eq!(cells, vec![0, 0, 0, 1, 0, 1, 0, 0, 0]);

        // Each write is preceded by exactly the three input reads of its neighborhood
        assert_eq!(log.len(), 9 * 4);
        for (i, chunk) in log.chunks(4).enumerate() {
            assert_eq!(
                chunk,
                &[
                    Access::Read(wrap_index(i as isize - 1, 9)),
                    Access::Read(i),
                    Access::Read(wrap_index(i as isize + 1, 9)),
                    Access::Write(i),
                ]
            );
        }
    }

    #[test]
    fn test_boundary_wraps() {
        let (_, log) = traced_step(vec![0; 5], 0);
        // Index 0 reads its left neighbor from the far end
        assert_eq!(log[0], Access::Read(4));
        // Index 4 reads its right neighbor from the start
        let last = &log[16..20];
        assert_eq!(last[2], Access::Read(0));
        assert_eq!(last[3], Access::Write(4));

        // A live cell at the right edge feeds index 0 under rule 90
        let (cells, _) = traced_step(vec![0, 0, 0, 0, 1], 90);
        assert_eq!(cells, vec![1, 0, 0, 1, 0]);
    }

    #[test]
    fn test_step_is_deterministic() {
        let mut a = create_grid(31, RuleTable::new(30)).unwrap();
        let mut b = create_grid(31, RuleTable::new(30)).unwrap();
        for _ in 0..20 {
            step_automaton(&mut a);
            step_automaton(&mut b);
            assert_eq!(a.cells, b.cells);
        }
        assert_eq!(a.generation, 20);
    }

    #[test]
    fn test_in_place_update_would_differ() {
        // Updating in place reads already-updated neighbors and gives a different row
        let rule = RuleTable::new(90);
        let mut in_place = vec![0u8, 0, 0, 0, 1, 0, 0, 0, 0];
        for i in 0..in_place.len() {
            let (l, c, r) = neighborhood(in_place.as_slice(), i);
            in_place[i] = rule.apply(l, c, r);
        }

        let mut state = create_grid(9, rule).unwrap();
        step_automaton(&mut state);
        assert_ne!(state.cells, in_place);
    }

    #[test]
    fn test_length_is_constant() {
        let mut state = create_grid(17, RuleTable::new(110)).unwrap();
        for _ in 0..50 {
            step_automaton(&mut state);
            assert_eq!(state.cells.len(), 17);
            assert!(state.cells.iter().all(|&c| c <= 1));
        }
    }
}
