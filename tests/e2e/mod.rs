// End-to-end tests for the resolution pipeline.
//
// Every external collaborator is replaced by an in-memory fake that counts
// its calls, so the tests can assert exactly which services ran for each
// text. Each test gets fresh fakes through the test-context lifecycle hooks.

mod test_batch;
mod test_resolver;
