//! Synthesis Commands - 合成命令

use crate::domain::synthesis::SynthesisOptions;

/// 同步合成
#[derive(Debug, Clone)]
pub struct Synthesize {
    pub options: SynthesisOptions,
}

impl Synthesize {
    pub fn new(options: SynthesisOptions) -> Self {
        Self { options }
    }
}

/// 流式合成
#[derive(Debug, Clone)]
pub struct SynthesizeStream {
    pub options: SynthesisOptions,
}

impl SynthesizeStream {
    pub fn new(options: SynthesisOptions) -> Self {
        Self { options }
    }
}
