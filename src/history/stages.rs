use crate::Checked;
use crate::Index;
use crate::MadpError;
use crate::Result;
use crate::Stage;

/// Per-stage history counts and the flat index of each stage's first history.
///
/// Invariant: `offsets[t] <= index < offsets[t] + counts[t]` for every
/// history of stage `t`, and `offsets[t + 1] == offsets[t] + counts[t]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stages {
    counts: Vec<Index>,
    offsets: Vec<Index>,
}

impl Stages {
    /// `counts[t] = base^t` for `t < horizon`, accumulated with overflow checks.
    pub fn lazy(base: Index, horizon: Stage) -> Result<Self> {
        let mut counts = Vec::with_capacity(horizon);
        let mut offsets = Vec::with_capacity(horizon);
        let mut count = 1 as Index;
        let mut offset = 0 as Index;
        for t in 0..horizon {
            if t > 0 {
                offset = offset.plus(count)?;
                count = count.times(base)?;
            }
            counts.push(count);
            offsets.push(offset);
        }
        // the end of the last stage must be representable as well
        if let (Some(&o), Some(&c)) = (offsets.last(), counts.last()) {
            o.plus(c)?;
        }
        Ok(Self { counts, offsets })
    }
    /// Open stage `stage` at `index` if it is not open yet.
    /// Called for every history in breadth-first order.
    pub fn record(&mut self, stage: Stage, index: Index) {
        while self.offsets.len() <= stage {
            log::debug!("stage {:>2} opens at index {}", self.offsets.len(), index);
            self.offsets.push(index);
        }
    }
    /// Close the tally once `total` histories have been recorded.
    pub fn close(&mut self, total: Index) {
        let ends = self
            .offsets
            .iter()
            .skip(1)
            .copied()
            .chain(std::iter::once(total));
        self.counts = self
            .offsets
            .iter()
            .zip(ends)
            .map(|(start, end)| end - start)
            .collect();
    }

    /// Number of stages tallied.
    pub fn horizon(&self) -> Stage {
        self.counts.len()
    }
    pub fn counts(&self) -> &[Index] {
        &self.counts
    }
    pub fn offsets(&self) -> &[Index] {
        &self.offsets
    }
    pub fn count(&self, stage: Stage) -> Result<Index> {
        self.counts.get(stage).copied().ok_or_else(|| self.beyond(stage))
    }
    pub fn offset(&self, stage: Stage) -> Result<Index> {
        self.offsets.get(stage).copied().ok_or_else(|| self.beyond(stage))
    }
    /// Number of histories over all stages.
    pub fn total(&self) -> Index {
        match (self.offsets.last(), self.counts.last()) {
            (Some(o), Some(c)) => o + c,
            _ => 0,
        }
    }
    /// Number of histories of stages before `stage`.
    pub fn before(&self, stage: Stage) -> Result<Index> {
        match stage == self.horizon() {
            true => Ok(self.total()),
            false => self.offset(stage),
        }
    }
    /// The largest `t` with `offsets[t] <= index`.
    pub fn stage(&self, index: Index) -> Result<Stage> {
        if index >= self.total() {
            return Err(MadpError::InvalidIndex(format!(
                "history index {} beyond {} histories",
                index,
                self.total()
            )));
        }
        Ok(self.offsets.partition_point(|&o| o <= index) - 1)
    }

    fn beyond(&self, stage: Stage) -> MadpError {
        MadpError::InvalidIndex(format!(
            "stage {} beyond horizon {}",
            stage,
            self.horizon()
        ))
    }
}
