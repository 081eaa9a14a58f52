mod mock_context;

pub use mock_context::MockContext;
