pub(crate) mod flow;
