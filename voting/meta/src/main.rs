fn main() {
    multiversx_sc_meta_lib::cli_main::<oracle_voting::AbiProvider>();
}
