mod answer;

pub(crate) use answer::{answer, healthz};
