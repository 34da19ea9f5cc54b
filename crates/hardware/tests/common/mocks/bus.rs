use caravel_periph_core::common::error::BusError;
use caravel_periph_core::env::BusTransactions;
use mockall::mock;

mock! {
    pub Bus {}
    impl BusTransactions for Bus {
        fn write(&mut self, addr: u32, value: u32) -> Result<(), BusError>;
        fn read(&mut self, addr: u32) -> Result<u32, BusError>;
    }
}
