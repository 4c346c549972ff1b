pub mod luis;
