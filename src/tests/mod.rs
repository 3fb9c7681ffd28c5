mod structural_hash;
mod transient;
