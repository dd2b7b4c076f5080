use crate::step_interface::AnnotatedSample;

/// Fixed-size sample accumulator. The filled vector is handed out whole and
/// returned afterwards so its allocation is reused for the next batch.
pub struct BatchBuffer {
    samples: Vec<AnnotatedSample>,
    spare: Option<Vec<AnnotatedSample>>,
    batch_size: usize,
}

impl BatchBuffer {
    pub fn with_batch_size(batch_size: usize) -> Self {
        Self {
            samples: Vec::with_capacity(batch_size),
            spare: None,
            batch_size,
        }
    }

    /// Appends a sample; returns `true` once the buffer holds a full batch.
    pub fn push(&mut self, sample: AnnotatedSample) -> bool {
        self.samples.push(sample);
        self.is_full()
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.batch_size
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Takes whatever is buffered, full or not, leaving the buffer empty.
    pub fn take_batch(&mut self) -> Vec<AnnotatedSample> {
        let replacement = self
            .spare
            .take()
            .unwrap_or_else(|| Vec::with_capacity(self.batch_size));
        std::mem::replace(&mut self.samples, replacement)
    }

    /// Returns a processed batch for reuse.
    pub fn recycle(&mut self, mut batch: Vec<AnnotatedSample>) {
        batch.clear();
        if self.spare.is_none() {
            self.spare = Some(batch);
        }
    }
}
