mod formatted;
mod inferred;
mod ordering;
