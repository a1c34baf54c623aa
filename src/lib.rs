pub mod dice3d;
